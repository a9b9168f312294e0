use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use crate::project::Project;

/// Element that declares a project's type GUIDs, `;`-separated
pub const PROJECT_TYPE_GUIDS_ELEMENT: &str = "ProjectTypeGuids";

/// A project kind that cannot be migrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnsupportedProjectType {
    pub guid: &'static str,
    pub description: &'static str,
}

/// Project type GUIDs that cannot be converted, in canonical upper case.
///
/// Project files normally carry these in lower case. Windows Forms apps have
/// no type GUID and so never appear here.
pub static UNSUPPORTED_PROJECT_TYPES: &[UnsupportedProjectType] = &[
    UnsupportedProjectType { guid: "{8BB2217D-0F2D-49D1-97BC-3654ED321F3B}", description: "ASP.NET 5" },
    UnsupportedProjectType { guid: "{603C0E0B-DB56-11DC-BE95-000D561079B0}", description: "ASP.NET MVC 1" },
    UnsupportedProjectType { guid: "{F85E285D-A4E0-4152-9332-AB1D724D3325}", description: "ASP.NET MVC 2" },
    UnsupportedProjectType { guid: "{E53F8FEA-EAE0-44A6-8774-FFD645390401}", description: "ASP.NET MVC 3" },
    UnsupportedProjectType { guid: "{E3E379DF-F4C6-4180-9B81-6769533ABE47}", description: "ASP.NET MVC 4" },
    UnsupportedProjectType { guid: "{349C5851-65DF-11DA-9384-00065B846F21}", description: "ASP.NET MVC 5" },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompatibilityError {
    #[error("No project given to the compatibility check")]
    MissingProject,
}

/// Whether the project declares a type GUID known to be unconvertible.
///
/// A project without a `ProjectTypeGuids` element is considered convertible.
/// Passing no project at all is a caller error.
pub fn is_unsupported_project_type(project: Option<&Project>) -> Result<bool, CompatibilityError> {
    let project = project.ok_or(CompatibilityError::MissingProject)?;
    Ok(unsupported_project_type(project).is_some())
}

/// First denylisted project type declared by the project, if any
pub fn unsupported_project_type(project: &Project) -> Option<&'static UnsupportedProjectType> {
    let element = project.find_element(PROJECT_TYPE_GUIDS_ELEMENT)?;
    let declared = element.value();

    let found = declared
        .split(';')
        .map(str::trim)
        .find_map(lookup_unsupported);

    if let Some(project_type) = found {
        debug!(guid = project_type.guid, kind = project_type.description, "unsupported project type declared");
    }
    found
}

// Denylist entries are ASCII, so ASCII case folding is the culture-invariant comparison
fn lookup_unsupported(guid: &str) -> Option<&'static UnsupportedProjectType> {
    UNSUPPORTED_PROJECT_TYPES
        .iter()
        .find(|unsupported| unsupported.guid.eq_ignore_ascii_case(guid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Element, XNamespace};

    fn project_declaring(type_guids: Option<&str>) -> Project {
        let ns = XNamespace::msbuild();
        let mut property_group = Element::new(ns.name("PropertyGroup"))
            .with_child(Element::new(ns.name("OutputType")).with_text("Library"));
        if let Some(guids) = type_guids {
            property_group = property_group
                .with_child(Element::new(ns.name(PROJECT_TYPE_GUIDS_ELEMENT)).with_text(guids));
        }
        let root = Element::new(ns.name("Project")).with_child(property_group);
        Project::new(Document::new(root), ns)
    }

    #[test]
    fn test_missing_declaration_is_supported() {
        let project = project_declaring(None);
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_denylisted_guid_with_whitespace() {
        let project = project_declaring(Some(" {F85E285D-A4E0-4152-9332-AB1D724D3325} ; {CUSTOM-GUID} "));
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(true));
        assert_eq!(unsupported_project_type(&project).unwrap().description, "ASP.NET MVC 2");
    }

    #[test]
    fn test_lower_case_guid_matches() {
        let project = project_declaring(Some(
            "{349c5851-65df-11da-9384-00065b846f21};{fae04ec0-301f-11d3-bf4b-00c04f79efbc}",
        ));
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(true));
    }

    #[test]
    fn test_unknown_guids_are_supported() {
        let project = project_declaring(Some("{CUSTOM-GUID-1};{CUSTOM-GUID-2}"));
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_no_partial_matches() {
        let project = project_declaring(Some("{603C0E0B-DB56-11DC-BE95-000D561079B0}-extra;603C0E0B-DB56-11DC-BE95-000D561079B0"));
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_empty_declaration_is_supported() {
        let project = project_declaring(Some(""));
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_absent_project_is_precondition_violation() {
        assert_eq!(is_unsupported_project_type(None), Err(CompatibilityError::MissingProject));
    }

    #[test]
    fn test_declaration_outside_namespace_ignored() {
        let root = Element::new(XNamespace::msbuild().name("Project")).with_child(
            Element::new(XNamespace::none().name(PROJECT_TYPE_GUIDS_ELEMENT))
                .with_text("{603C0E0B-DB56-11DC-BE95-000D561079B0}"),
        );
        let project = Project::new(Document::new(root), XNamespace::msbuild());
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_only_first_declaration_consulted() {
        let ns = XNamespace::msbuild();
        let root = Element::new(ns.name("Project"))
            .with_child(Element::new(ns.name(PROJECT_TYPE_GUIDS_ELEMENT)).with_text("{CUSTOM-GUID}"))
            .with_child(
                Element::new(ns.name(PROJECT_TYPE_GUIDS_ELEMENT))
                    .with_text("{603C0E0B-DB56-11DC-BE95-000D561079B0}"),
            );
        let project = Project::new(Document::new(root), ns);
        assert_eq!(is_unsupported_project_type(Some(&project)), Ok(false));
    }

    #[test]
    fn test_denylist_is_canonical_upper_case() {
        for entry in UNSUPPORTED_PROJECT_TYPES {
            assert_eq!(entry.guid, entry.guid.to_uppercase());
            assert!(entry.guid.starts_with('{') && entry.guid.ends_with('}'));
        }
    }
}
