//! deno.land specifier parser
//!
//! Handles specifier formats:
//! - Standard library: `https://deno.land/std@0.200.0/path/mod.ts`
//! - Third-party: `https://deno.land/x/hono@v3.0.0/mod.ts`

use crate::domain::{Dependency, RegistryKind, DENO_LAND_HOST};
use crate::parser::SpecifierParser;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches `@<version><path>` right after the module name
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(?P<version>[A-Za-z]?\d+\.\d+\.\d+(?:-[\w.]+)?(?:\+[\w.]+)?)(?P<path>/.*)?$")
        .unwrap()
});
static X_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/x/(?P<name>[^/@]+)(?P<rest>.*)$").unwrap());

/// Parser for specifiers served from deno.land
pub struct DenoLandParser {
    kind: RegistryKind,
}

impl DenoLandParser {
    /// Parser for the standard library
    pub fn std() -> Self {
        Self {
            kind: RegistryKind::Std,
        }
    }

    /// Parser for third-party modules
    pub fn x() -> Self {
        Self {
            kind: RegistryKind::X,
        }
    }

    fn split_version(&self, name: String, rest: &str) -> Option<Dependency> {
        let caps = VERSION_RE.captures(rest)?;
        let version = caps.name("version")?.as_str();
        let path = caps.name("path").map_or("", |m| m.as_str());
        Some(Dependency::new(self.kind, name, version, path))
    }
}

impl SpecifierParser for DenoLandParser {
    fn parse(&self, specifier: &Url) -> Option<Dependency> {
        if specifier.host_str() != Some(DENO_LAND_HOST) {
            return None;
        }
        let path = specifier.path();

        match self.kind {
            RegistryKind::Std => {
                let rest = path.strip_prefix("/std")?;
                self.split_version(format!("{}/std", DENO_LAND_HOST), rest)
            }
            RegistryKind::X => {
                let caps = X_NAME_RE.captures(path)?;
                let name = format!("{}/x/{}", DENO_LAND_HOST, &caps["name"]);
                self.split_version(name, caps.name("rest")?.as_str())
            }
            _ => None,
        }
    }

    fn kind(&self) -> RegistryKind {
        self.kind
    }
}
