use crate::domain::version::{Increment, Version};
use crate::error::Result;

/// Tag naming template (e.g., "v%major%.%minor%.%patch%")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFormat {
    pub template: String,
}

impl TagFormat {
    pub const MAJOR: &'static str = "%major%";
    pub const MINOR: &'static str = "%minor%";
    pub const PATCH: &'static str = "%patch%";

    /// Create a new tag format
    pub fn new(template: impl Into<String>) -> Self {
        TagFormat {
            template: template.into(),
        }
    }

    /// Render a version according to the template
    /// Example: template="v%major%.%minor%.%patch%", version=1.2.3 -> "v1.2.3"
    ///
    /// Other `%name%` sequences are left as they are.
    pub fn render(&self, version: &Version) -> String {
        self.template
            .replace(Self::MAJOR, &version.major.to_string())
            .replace(Self::MINOR, &version.minor.to_string())
            .replace(Self::PATCH, &version.patch.to_string())
    }

    /// Whether the template references any version field at all
    pub fn has_placeholders(&self) -> bool {
        [Self::MAJOR, Self::MINOR, Self::PATCH]
            .iter()
            .any(|p| self.template.contains(p))
    }
}

impl Default for TagFormat {
    fn default() -> Self {
        TagFormat::new("v%major%.%minor%.%patch%")
    }
}

/// Parse `current`, parse `increment`, bump and render with `template`.
///
/// Fails at the first step that fails with that step's error kind.
pub fn bump_and_format(current: &str, increment: &str, template: &str) -> Result<String> {
    let version = Version::parse(current)?;
    let increment = Increment::parse(increment)?;
    Ok(TagFormat::new(template).render(&version.bump(increment)?))
}
