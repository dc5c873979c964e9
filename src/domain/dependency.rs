//! Parsed dependency structures

use super::RegistryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A versioned module reference extracted from a specifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// Registry convention the specifier follows
    pub kind: RegistryKind,
    /// Registry-qualified module name without version or sub-path
    pub name: String,
    /// Raw version token as written (may carry a `v` prefix)
    pub version: String,
    /// Remaining sub-path after the version (possibly empty)
    pub path: String,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        kind: RegistryKind,
        name: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            version: version.into(),
            path: path.into(),
        }
    }

    /// Returns true if the version token is a pre-release
    pub fn is_prerelease(&self) -> bool {
        crate::update::is_prerelease_version(&self.version)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}{} [{}]", self.name, self.version, self.path, self.kind)
    }
}
