//! Specifier parsers for the supported registry kinds
//!
//! This module turns a module specifier into a registry-qualified
//! [`Dependency`]:
//! - deno.land standard library (`https://deno.land/std@0.200.0/...`)
//! - deno.land third-party modules (`https://deno.land/x/<name>@v1.0.0/...`)
//! - npm packages (`npm:<name>@<version>/...`)
//! - built-in namespace (`node:<name>@<version>`)
//!
//! A specifier without a recognisable version token is not an error; the
//! parsers return `None` and the caller skips it.

mod deno_land;
mod package;

pub use deno_land::DenoLandParser;
pub use package::PackageParser;

use crate::domain::{Dependency, RegistryKind};
use url::Url;

/// Trait for parsing module specifiers of one registry kind
pub trait SpecifierParser {
    /// Parse a specifier into its dependency properties
    fn parse(&self, specifier: &Url) -> Option<Dependency>;

    /// Returns the registry kind this parser handles
    fn kind(&self) -> RegistryKind;
}

/// Get a specifier parser for the specified registry kind
pub fn get_parser(kind: RegistryKind) -> Box<dyn SpecifierParser> {
    match kind {
        RegistryKind::Std => Box::new(DenoLandParser::std()),
        RegistryKind::X => Box::new(DenoLandParser::x()),
        RegistryKind::Npm => Box::new(PackageParser::npm()),
        RegistryKind::Node => Box::new(PackageParser::node()),
    }
}

/// Parse a specifier, dispatching on its registry kind
pub fn parse_props(specifier: &Url) -> Option<Dependency> {
    let kind = RegistryKind::detect(specifier)?;
    get_parser(kind).parse(specifier)
}

/// Parse a raw specifier string; relative and malformed specifiers yield `None`
pub fn parse_specifier(specifier: &str) -> Option<Dependency> {
    let url = Url::parse(specifier).ok()?;
    parse_props(&url)
}
