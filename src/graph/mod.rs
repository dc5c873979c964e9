//! Module graph interface
//!
//! The graph builder is a collaborator: given a root module it returns every
//! reachable module with its dependency edges. The engine injects a load
//! policy at call time that decides which specifiers are walked and which
//! are opaque leaves.

mod local;
mod scanner;

pub use local::LocalGraphBuilder;
pub use scanner::{ImportScanner, ScannedImport};

use crate::domain::CodeSpan;
use crate::error::GraphError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// A dependency edge as seen in the referring module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Specifier exactly as written in the source
    pub specifier: String,
    /// Location of the specifier literal, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeSpan>,
}

impl Edge {
    pub fn new(specifier: impl Into<String>, code: Option<CodeSpan>) -> Self {
        Self {
            specifier: specifier.into(),
            code,
        }
    }
}

/// A module in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub specifier: Url,
    #[serde(default)]
    pub dependencies: Vec<Edge>,
}

impl Module {
    pub fn new(specifier: Url, dependencies: Vec<Edge>) -> Self {
        Self {
            specifier,
            dependencies,
        }
    }
}

/// Every module reachable from a root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    pub modules: Vec<Module>,
}

impl ModuleGraph {
    /// Total number of dependency edges across all modules
    pub fn edge_count(&self) -> usize {
        self.modules.iter().map(|m| m.dependencies.len()).sum()
    }
}

/// Decision returned by the load policy for one specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDecision {
    /// Record the module as a leaf without walking into it
    External,
    /// Let the graph builder load and parse the module
    Default,
}

/// Load policy handed to the graph builder
pub type LoadFn = dyn Fn(&str) -> Result<LoadDecision, GraphError> + Send + Sync;

/// Build the standard load policy
///
/// `npm:` and `node:` specifiers are always external. `http(s)` specifiers
/// are external unless `load_remote` is set. A specifier that is not a URL
/// is an error.
pub fn load_policy(
    load_remote: bool,
) -> impl Fn(&str) -> Result<LoadDecision, GraphError> + Send + Sync {
    move |specifier: &str| {
        let url = Url::parse(specifier)
            .map_err(|e| GraphError::invalid_specifier(specifier, e.to_string()))?;
        let decision = match url.scheme() {
            "npm" | "node" => LoadDecision::External,
            "http" | "https" if !load_remote => LoadDecision::External,
            _ => LoadDecision::Default,
        };
        Ok(decision)
    }
}

/// Trait for module graph builders
#[async_trait]
pub trait GraphBuilder: Send + Sync {
    /// Build the graph rooted at `root`, consulting `load` for every module
    async fn build_graph(&self, root: &Url, load: &LoadFn) -> Result<ModuleGraph, GraphError>;
}
