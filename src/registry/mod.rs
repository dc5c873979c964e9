//! Registry adapters for fetching module version listings
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - deno.land CDN adapter (standard library and third-party modules)
//! - npm Registry adapter
//! - The version resolver that dispatches on registry kind

mod client;
mod deno_land;
mod npm;
mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use client::HttpClient;
pub use deno_land::DenoLandAdapter;
pub use npm::NpmAdapter;
pub use resolver::VersionResolver;

use crate::domain::RegistryKind;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry kind this adapter handles
    fn kind(&self) -> RegistryKind;

    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch every published version of a dependency, in any order
    async fn fetch_versions(&self, name: &str) -> Result<Vec<String>, RegistryError>;
}

/// Create a registry adapter for the given kind
///
/// Built-in modules have no registry to query.
pub fn create_adapter(kind: RegistryKind, client: HttpClient) -> Option<Box<dyn RegistryAdapter>> {
    match kind {
        RegistryKind::Std => Some(Box::new(DenoLandAdapter::std(client))),
        RegistryKind::X => Some(Box::new(DenoLandAdapter::x(client))),
        RegistryKind::Npm => Some(Box::new(NpmAdapter::new(client))),
        RegistryKind::Node => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_adapter_kinds() {
        let client = HttpClient::new().unwrap();
        for kind in [RegistryKind::Std, RegistryKind::X, RegistryKind::Npm] {
            let adapter = create_adapter(kind, client.clone()).unwrap();
            assert_eq!(adapter.kind(), kind);
        }
    }

    #[test]
    fn test_create_adapter_node() {
        let client = HttpClient::new().unwrap();
        assert!(create_adapter(RegistryKind::Node, client).is_none());
    }
}
