//! Registry-prefixed package specifier parser
//!
//! Handles specifier formats:
//! - `npm:preact@10.19.2`
//! - `npm:@preact/signals@1.2.1/dist/index.js`
//! - `node:<name>@<version>` (built-in namespace)

use crate::domain::{Dependency, RegistryKind};
use crate::parser::SpecifierParser;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^/?(?P<name>@[^/@]+/[^/@]+|[^/@]+)@(?P<version>v?\d+\.\d+\.\d+(?:-[\w.]+)?(?:\+[\w.]+)?)(?P<path>/.*)?$",
    )
    .unwrap()
});

/// Parser for `scheme:<name>@<version><path>` specifiers
pub struct PackageParser {
    kind: RegistryKind,
}

impl PackageParser {
    /// Parser for npm packages
    pub fn npm() -> Self {
        Self {
            kind: RegistryKind::Npm,
        }
    }

    /// Parser for the built-in namespace
    pub fn node() -> Self {
        Self {
            kind: RegistryKind::Node,
        }
    }

    fn scheme(&self) -> &'static str {
        match self.kind {
            RegistryKind::Node => "node",
            _ => "npm",
        }
    }
}

impl SpecifierParser for PackageParser {
    fn parse(&self, specifier: &Url) -> Option<Dependency> {
        if specifier.scheme() != self.scheme() {
            return None;
        }
        let caps = PACKAGE_RE.captures(specifier.path())?;
        let name = caps.name("name")?.as_str();
        let version = caps.name("version")?.as_str();
        let path = caps.name("path").map_or("", |m| m.as_str());
        Some(Dependency::new(self.kind, name, version, path))
    }

    fn kind(&self) -> RegistryKind {
        self.kind
    }
}
