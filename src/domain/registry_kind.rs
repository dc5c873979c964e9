//! Registry kinds recognised in module specifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Host serving the standard library and third-party modules
pub const DENO_LAND_HOST: &str = "deno.land";

/// Closed set of naming/versioning conventions a specifier may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Standard library (`https://deno.land/std@0.200.0/...`)
    Std,
    /// Third-party modules (`https://deno.land/x/<name>@v1.0.0/...`)
    X,
    /// npm packages (`npm:<name>@<version>`)
    Npm,
    /// Built-in namespace (`node:<name>`)
    Node,
}

impl RegistryKind {
    /// Determine the registry kind from a specifier's scheme and host
    pub fn detect(specifier: &Url) -> Option<Self> {
        match specifier.scheme() {
            "npm" => Some(RegistryKind::Npm),
            "node" => Some(RegistryKind::Node),
            "http" | "https" if specifier.host_str() == Some(DENO_LAND_HOST) => {
                let path = specifier.path();
                if path.starts_with("/std") {
                    Some(RegistryKind::Std)
                } else if path.starts_with("/x/") {
                    Some(RegistryKind::X)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns the registry name used in messages
    pub fn registry_name(&self) -> &'static str {
        match self {
            RegistryKind::Std => "deno.land/std",
            RegistryKind::X => "deno.land/x",
            RegistryKind::Npm => "npm",
            RegistryKind::Node => "node",
        }
    }

    /// Returns all registry kinds
    pub fn all() -> &'static [RegistryKind] {
        &[
            RegistryKind::Std,
            RegistryKind::X,
            RegistryKind::Npm,
            RegistryKind::Node,
        ]
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registry_name())
    }
}
