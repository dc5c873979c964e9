//! Update collection over a module graph
//!
//! Builds the graph through the injected [`GraphBuilder`], then composes an
//! update for every dependency edge concurrently. Results arrive in
//! completion order; callers needing a stable order must sort them.

use crate::domain::DependencyUpdate;
use crate::error::GraphError;
use crate::graph::{load_policy, GraphBuilder};
use crate::update::UpdateComposer;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Options for a collection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Walk into `http(s)` modules instead of treating them as leaves
    pub load_remote: bool,
}

/// Collects dependency updates for every module reachable from a root
pub struct UpdateCollector {
    graph_builder: Arc<dyn GraphBuilder>,
    composer: UpdateComposer,
}

impl UpdateCollector {
    /// Create a collector from a graph builder and a composer
    pub fn new(graph_builder: Arc<dyn GraphBuilder>, composer: UpdateComposer) -> Self {
        Self {
            graph_builder,
            composer,
        }
    }

    /// Collect every available update in the graph rooted at `root`
    ///
    /// Only graph construction can fail; an edge whose specifier cannot be
    /// parsed or resolved just contributes no update.
    pub async fn collect_dependency_update_all(
        &self,
        root: &Url,
        options: CollectOptions,
    ) -> Result<Vec<DependencyUpdate>, GraphError> {
        let load = load_policy(options.load_remote);
        let graph = self.graph_builder.build_graph(root, &load).await?;
        log::debug!(
            "{}: {} modules, {} edges",
            root,
            graph.modules.len(),
            graph.edge_count()
        );

        let mut tasks = JoinSet::new();
        for module in graph.modules {
            let referrer = Arc::new(module.specifier);
            for edge in module.dependencies {
                let composer = self.composer.clone();
                let referrer = Arc::clone(&referrer);
                tasks.spawn(async move { composer.create_dependency_update(&edge, &referrer).await });
            }
        }

        let mut updates = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(update)) => updates.push(update),
                Ok(None) => {}
                Err(e) => log::warn!("update task failed: {}", e),
            }
        }

        Ok(updates)
    }
}
