//! Update composition for module dependencies
//!
//! This module provides:
//! - Update filter configuration from CLI args and config file
//! - Semantic version ordering and latest-version selection
//! - The composer that turns a graph edge into a dependency update

mod filter;
mod version;

pub use filter::UpdateFilter;
pub use version::{compare_versions, is_prerelease_version, parse_version, select_latest};

use crate::domain::DependencyUpdate;
use crate::graph::Edge;
use crate::parser::parse_specifier;
use crate::registry::VersionResolver;
use std::cmp::Ordering;
use std::sync::Arc;
use url::Url;

/// Combines a parsed specifier and its latest version into an update record
#[derive(Clone)]
pub struct UpdateComposer {
    resolver: Arc<VersionResolver>,
    filter: UpdateFilter,
}

impl UpdateComposer {
    /// Create a composer that considers every dependency
    pub fn new(resolver: Arc<VersionResolver>) -> Self {
        Self::with_filter(resolver, UpdateFilter::new())
    }

    /// Create a composer with a name filter
    pub fn with_filter(resolver: Arc<VersionResolver>, filter: UpdateFilter) -> Self {
        Self { resolver, filter }
    }

    /// Build the update for one dependency edge of `referrer`
    ///
    /// Returns `None` when the specifier is not versioned, the dependency is
    /// filtered out, resolution fails, or the specifier is already at (or
    /// beyond) the latest version.
    pub async fn create_dependency_update(
        &self,
        edge: &Edge,
        referrer: &Url,
    ) -> Option<DependencyUpdate> {
        let dependency = parse_specifier(&edge.specifier)?;

        if !edge.specifier.contains(&dependency.version) {
            log::debug!(
                "{}: version {} not found verbatim in specifier",
                edge.specifier,
                dependency.version
            );
            return None;
        }

        if !self.filter.should_process(&dependency.name) {
            log::debug!("{}: filtered out", dependency.name);
            return None;
        }

        let latest = self.resolver.resolve_latest(&dependency).await?;

        if latest == dependency.version {
            return None;
        }
        if compare_versions(&dependency.version, &latest) != Some(Ordering::Less) {
            log::debug!(
                "{}: {} is not older than {}",
                dependency.name,
                dependency.version,
                latest
            );
            return None;
        }

        Some(DependencyUpdate::new(
            edge.specifier.clone(),
            referrer.clone(),
            &dependency,
            latest,
            edge.code,
        ))
    }
}
