use serde::{Deserialize, Serialize};
use crate::document::{Document, Element, XNamespace};

/// Migratable settings of one project file plus the document it was parsed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectSnapshot")]
pub struct Project {
    /// Ordered; the first entry is the primary framework. Not deduplicated.
    pub target_frameworks: Vec<String>,
    pub append_target_framework_to_output_path: bool,
    pub document: Document,
    pub namespace: XNamespace,
}

/// On-disk form of a project. Without an explicit namespace the project
/// takes the namespace of its root element.
#[derive(Deserialize)]
struct ProjectSnapshot {
    #[serde(default)]
    target_frameworks: Vec<String>,
    #[serde(default = "default_append_target_framework")]
    append_target_framework_to_output_path: bool,
    document: Document,
    namespace: Option<XNamespace>,
}

impl From<ProjectSnapshot> for Project {
    fn from(snapshot: ProjectSnapshot) -> Self {
        let namespace = snapshot
            .namespace
            .unwrap_or_else(|| snapshot.document.root.name.namespace.clone());
        Self {
            target_frameworks: snapshot.target_frameworks,
            append_target_framework_to_output_path: snapshot.append_target_framework_to_output_path,
            document: snapshot.document,
            namespace,
        }
    }
}

fn default_append_target_framework() -> bool {
    true
}

impl Project {
    pub fn new(document: Document, namespace: XNamespace) -> Self {
        Self {
            target_frameworks: Vec::new(),
            append_target_framework_to_output_path: true,
            document,
            namespace,
        }
    }

    /// Project with an empty root `Project` element in the given namespace
    pub fn empty(namespace: XNamespace) -> Self {
        let root = Element::new(namespace.name("Project"));
        Self::new(Document::new(root), namespace)
    }

    pub fn with_target_frameworks<I, S>(mut self, frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_frameworks = frameworks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_append_target_framework_to_output_path(mut self, append: bool) -> Self {
        self.append_target_framework_to_output_path = append;
        self
    }

    /// First element with the given local name under the project's namespace
    pub fn find_element(&self, local_name: &str) -> Option<&Element> {
        let name = self.namespace.name(local_name);
        self.document.descendants(&name).next()
    }

    pub fn primary_target_framework(&self) -> Option<&str> {
        self.target_frameworks.first().map(String::as_str)
    }
}
