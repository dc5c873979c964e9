//! Default graph builder for local source trees
//!
//! Walks breadth-first from a root module, loading `file:` modules from
//! disk and, when the load policy allows it, `http(s):` modules through the
//! registry HTTP client.

use crate::error::GraphError;
use crate::graph::{
    Edge, GraphBuilder, ImportScanner, LoadDecision, LoadFn, Module, ModuleGraph,
};
use crate::registry::HttpClient;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use url::Url;

/// Graph builder that scans module text for import specifiers
pub struct LocalGraphBuilder {
    scanner: &'static ImportScanner,
    client: Option<HttpClient>,
}

impl LocalGraphBuilder {
    /// Create a builder able to fetch remote modules
    pub fn new(client: HttpClient) -> Self {
        Self {
            scanner: ImportScanner::shared(),
            client: Some(client),
        }
    }

    /// Create a builder that records remote modules as leaves
    pub fn offline() -> Self {
        Self {
            scanner: ImportScanner::shared(),
            client: None,
        }
    }

    /// Turn a path on disk into the root module URL
    pub fn root_url(path: &Path) -> Result<Url, GraphError> {
        let invalid = || GraphError::InvalidRoot {
            path: path.to_path_buf(),
        };
        let absolute = std::fs::canonicalize(path).map_err(|_| invalid())?;
        Url::from_file_path(absolute).map_err(|_| invalid())
    }

    /// Load module text; `Ok(None)` means the scheme has no source to scan
    async fn load_source(&self, url: &Url) -> Result<Option<String>, String> {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| "not a local path".to_string())?;
                tokio::fs::read_to_string(&path)
                    .await
                    .map(Some)
                    .map_err(|e| e.to_string())
            }
            "http" | "https" => match &self.client {
                Some(client) => client
                    .get_text(url.as_str(), url.as_str(), "remote module")
                    .await
                    .map(Some)
                    .map_err(|e| e.to_string()),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Resolve an import specifier against its referrer
    fn resolve(referrer: &Url, specifier: &str) -> Option<Url> {
        if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
        {
            referrer.join(specifier).ok()
        } else {
            Url::parse(specifier).ok()
        }
    }
}

#[async_trait]
impl GraphBuilder for LocalGraphBuilder {
    async fn build_graph(&self, root: &Url, load: &LoadFn) -> Result<ModuleGraph, GraphError> {
        let mut graph = ModuleGraph::default();
        let mut seen: HashSet<Url> = HashSet::from([root.clone()]);
        let mut queue: VecDeque<Url> = VecDeque::from([root.clone()]);

        while let Some(url) = queue.pop_front() {
            if load(url.as_str())? == LoadDecision::External {
                graph.modules.push(Module::new(url, Vec::new()));
                continue;
            }

            let text = match self.load_source(&url).await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    graph.modules.push(Module::new(url, Vec::new()));
                    continue;
                }
                Err(message) if &url == root => return Err(GraphError::load(url, message)),
                Err(message) => {
                    log::warn!("failed to load {}: {}", url, message);
                    graph.modules.push(Module::new(url, Vec::new()));
                    continue;
                }
            };

            let mut dependencies = Vec::new();
            for import in self.scanner.scan(&text) {
                match Self::resolve(&url, &import.specifier) {
                    Some(resolved) => {
                        if seen.insert(resolved.clone()) {
                            queue.push_back(resolved);
                        }
                    }
                    None => log::debug!("{}: unresolvable specifier {}", url, import.specifier),
                }
                dependencies.push(Edge::new(import.specifier, Some(import.span)));
            }

            log::debug!("{}: {} dependencies", url, dependencies.len());
            graph.modules.push(Module::new(url, dependencies));
        }

        Ok(graph)
    }
}
