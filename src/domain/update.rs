//! Dependency update records

use super::{CodeSpan, Dependency, RegistryKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Identity of the updated dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRef {
    pub kind: RegistryKind,
    pub name: String,
    pub path: String,
}

/// Version change carried by an update
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionChange {
    pub from: String,
    pub to: String,
}

/// A computed version bump for one import of one referrer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyUpdate {
    /// Specifier exactly as written in the referrer
    pub specifier: String,
    /// Absolute location of the file containing the import
    pub referrer: Url,
    pub dependency: DependencyRef,
    pub version: VersionChange,
    /// Location of the specifier literal, if the graph builder knew it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeSpan>,
}

impl DependencyUpdate {
    /// Creates an update from a parsed dependency and its resolved version
    pub fn new(
        specifier: impl Into<String>,
        referrer: Url,
        dependency: &Dependency,
        to: impl Into<String>,
        code: Option<CodeSpan>,
    ) -> Self {
        Self {
            specifier: specifier.into(),
            referrer,
            dependency: DependencyRef {
                kind: dependency.kind,
                name: dependency.name.clone(),
                path: dependency.path.clone(),
            },
            version: VersionChange {
                from: dependency.version.clone(),
                to: to.into(),
            },
            code,
        }
    }

    /// The specifier with the first occurrence of `from` replaced by `to`
    pub fn new_specifier(&self) -> String {
        self.specifier
            .replacen(&self.version.from, &self.version.to, 1)
    }
}

impl fmt::Display for DependencyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.dependency.name, self.version.from, self.version.to
        )
    }
}

/// An update together with the referrer's full text after applying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUpdateResult {
    #[serde(flatten)]
    pub update: DependencyUpdate,
    pub content: String,
}
