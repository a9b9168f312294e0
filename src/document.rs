use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Namespace of the classic (pre-SDK) MSBuild project schema
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// XML namespace scoping element lookups. The empty namespace is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XNamespace(String);

impl XNamespace {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn msbuild() -> Self {
        Self::new(MSBUILD_NAMESPACE)
    }

    pub fn uri(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Qualify a local name with this namespace
    pub fn name(&self, local_name: &str) -> XName {
        XName::new(self.clone(), local_name)
    }
}

/// Qualified element name: namespace plus local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct XName {
    #[serde(default, skip_serializing_if = "XNamespace::is_none")]
    pub namespace: XNamespace,
    pub local_name: String,
}

impl XName {
    pub fn new(namespace: XNamespace, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_none() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace.uri(), self.local_name)
        }
    }
}

/// Child node of an element. Text nodes serialize as bare strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

// Element text like `true` or `4` arrives as a YAML bool or number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Element(Element),
    Text(String),
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawNode::deserialize(deserializer)? {
            RawNode::Element(element) => Node::Element(element),
            RawNode::Text(text) => Node::Text(text),
            RawNode::Bool(value) => Node::Text(value.to_string()),
            RawNode::Integer(value) => Node::Text(value.to_string()),
            RawNode::Unsigned(value) => Node::Text(value.to_string()),
            RawNode::Float(value) => Node::Text(value.to_string()),
        })
    }
}

/// In-memory element tree backing a project. Produced by whatever parsed
/// the project file; the migration core only queries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: XName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: XName) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Direct child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements with the given name, in document order.
    /// The element itself is not included.
    pub fn descendants<'a, 'n>(&'a self, name: &'n XName) -> Descendants<'a, 'n> {
        let mut stack: Vec<&Element> = self.elements().collect();
        stack.reverse();
        Descendants { stack, name }
    }

    /// Concatenated text of this element and all of its descendants
    pub fn value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// A parsed project document: the root element of the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// All elements with the given name, root included, in document order
    pub fn descendants<'a, 'n>(&'a self, name: &'n XName) -> Descendants<'a, 'n> {
        Descendants {
            stack: vec![&self.root],
            name,
        }
    }
}

/// Pre-order walk over descendants filtered by name
pub struct Descendants<'a, 'n> {
    stack: Vec<&'a Element>,
    name: &'n XName,
}

impl<'a, 'n> Iterator for Descendants<'a, 'n> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            let children: Vec<&Element> = element.elements().collect();
            self.stack.extend(children.into_iter().rev());
            if &element.name == self.name {
                return Some(element);
            }
        }
        None
    }
}
