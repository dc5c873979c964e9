//! Latest-version resolution per registry kind

use crate::domain::{Dependency, RegistryKind};
use crate::registry::{create_adapter, HttpClient, RegistryAdapter};
use crate::update::select_latest;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default limit on concurrent registry requests
const DEFAULT_CONCURRENCY: usize = 10;

/// Resolves the newest published version of a dependency
///
/// Resolution has no side effects beyond the registry request, so the same
/// name may be resolved any number of times concurrently.
pub struct VersionResolver {
    adapters: HashMap<RegistryKind, Arc<dyn RegistryAdapter>>,
    semaphore: Arc<Semaphore>,
}

impl VersionResolver {
    /// Create a resolver with an adapter for every queryable registry
    pub fn new(client: HttpClient) -> Self {
        RegistryKind::all()
            .iter()
            .filter_map(|kind| create_adapter(*kind, client.clone()))
            .fold(Self::empty(), |resolver, adapter| {
                resolver.with_adapter(Arc::from(adapter))
            })
    }

    /// Create a resolver without adapters
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Register (or replace) the adapter for the adapter's kind
    pub fn with_adapter(mut self, adapter: Arc<dyn RegistryAdapter>) -> Self {
        self.adapters.insert(adapter.kind(), adapter);
        self
    }

    /// Set the maximum number of in-flight registry requests
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    /// Resolve the latest version for a parsed dependency
    ///
    /// Returns `None` when no adapter handles the kind, the registry cannot
    /// be reached, or it lists no suitable version.
    pub async fn resolve_latest(&self, dependency: &Dependency) -> Option<String> {
        let adapter = self.adapters.get(&dependency.kind)?;

        let versions = {
            let _permit = self.semaphore.acquire().await.ok()?;
            adapter.fetch_versions(&dependency.name).await
        };

        match versions {
            Ok(versions) => select_latest(&dependency.version, &versions),
            Err(e) => {
                log::debug!("{}: {}", dependency.name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::testing::StaticAdapter;

    fn resolver() -> VersionResolver {
        VersionResolver::empty()
            .with_adapter(Arc::new(
                StaticAdapter::new(RegistryKind::X).with("deno.land/x/hono", &["v3.0.0", "v3.11.7", "v4.0.0-rc.1"]),
            ))
            .with_adapter(Arc::new(
                StaticAdapter::new(RegistryKind::Npm).with("preact", &["10.0.0", "10.19.2"]),
            ))
    }

    #[test]
    fn test_new_registers_queryable_kinds() {
        let resolver = VersionResolver::new(HttpClient::new().unwrap());
        assert!(resolver.adapters.contains_key(&RegistryKind::Std));
        assert!(resolver.adapters.contains_key(&RegistryKind::X));
        assert!(resolver.adapters.contains_key(&RegistryKind::Npm));
        assert!(!resolver.adapters.contains_key(&RegistryKind::Node));
    }

    #[tokio::test]
    async fn test_resolve_latest() {
        let dep = Dependency::new(RegistryKind::X, "deno.land/x/hono", "v3.0.0", "/mod.ts");
        assert_eq!(resolver().resolve_latest(&dep).await, Some("v3.11.7".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_unknown_name() {
        let dep = Dependency::new(RegistryKind::Npm, "missing", "1.0.0", "");
        assert_eq!(resolver().resolve_latest(&dep).await, None);
    }

    #[tokio::test]
    async fn test_resolve_kind_without_adapter() {
        let dep = Dependency::new(RegistryKind::Node, "buffer", "1.0.0", "");
        assert_eq!(resolver().resolve_latest(&dep).await, None);
    }

    #[tokio::test]
    async fn test_resolve_concurrently_is_idempotent() {
        let resolver = resolver();
        let dep = Dependency::new(RegistryKind::Npm, "preact", "10.0.0", "");
        let (a, b) = tokio::join!(resolver.resolve_latest(&dep), resolver.resolve_latest(&dep));
        assert_eq!(a, Some("10.19.2".to_string()));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_concurrency_limit_of_one() {
        let resolver = resolver().with_concurrency(0);
        let dep = Dependency::new(RegistryKind::Npm, "preact", "10.0.0", "");
        let (a, b) = tokio::join!(resolver.resolve_latest(&dep), resolver.resolve_latest(&dep));
        assert_eq!(a, b);
    }
}
