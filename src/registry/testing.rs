//! In-memory registry adapter for tests

use crate::domain::RegistryKind;
use crate::error::RegistryError;
use crate::registry::RegistryAdapter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Adapter answering from a fixed version table
pub struct StaticAdapter {
    kind: RegistryKind,
    versions: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
}

impl StaticAdapter {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            versions: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, name: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            name.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryAdapter for StaticAdapter {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn registry_name(&self) -> &'static str {
        self.kind.registry_name()
    }

    async fn fetch_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.versions
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(name, self.registry_name()))
    }
}
