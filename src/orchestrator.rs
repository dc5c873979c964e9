//! Run orchestration
//!
//! This module provides:
//! - Workflow coordination: collect -> group by referrer -> patch -> write
//! - Dry-run mode support
//! - Error handling with per-file continuation

use crate::collector::{CollectOptions, UpdateCollector};
use crate::config::RunOptions;
use crate::domain::{DependencyUpdate, ModulePatchResult};
use crate::error::{AppError, RegistryError};
use crate::graph::{GraphBuilder, LocalGraphBuilder};
use crate::patcher::{group_by_referrer, SourcePatcher};
use crate::progress::Progress;
use crate::registry::{HttpClient, VersionResolver};
use crate::update::UpdateComposer;
use crate::writer::{ModuleWriter, WriteResult};
use std::sync::Arc;
use url::Url;

/// Coordinates one update run over a root module
pub struct Orchestrator {
    options: RunOptions,
    collector: UpdateCollector,
    patcher: SourcePatcher,
    writer: ModuleWriter,
}

/// Outcome of a run
#[derive(Debug)]
pub struct RunResult {
    pub root: Url,
    pub dry_run: bool,
    /// Every computed update, sorted by referrer and position
    pub updates: Vec<DependencyUpdate>,
    /// One grouped patch per referrer that had updates
    pub patches: Vec<ModulePatchResult>,
    pub write_results: Vec<WriteResult>,
    /// Per-file failures that did not stop the run
    pub errors: Vec<AppError>,
}

impl RunResult {
    /// Number of updates applied to some buffer
    pub fn applied_count(&self) -> usize {
        self.patches.iter().map(|p| p.applied_count()).sum()
    }

    /// Number of updates that could not be applied
    pub fn skipped_count(&self) -> usize {
        self.patches.iter().map(|p| p.skipped.len()).sum()
    }

    /// Number of files written to disk
    pub fn files_modified(&self) -> usize {
        self.write_results.iter().filter(|w| w.file_modified).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Orchestrator {
    /// Create an orchestrator backed by the live registries and the local graph builder
    pub fn new(options: RunOptions) -> Result<Self, RegistryError> {
        let client = HttpClient::new()?;
        let builder: Arc<dyn GraphBuilder> = Arc::new(LocalGraphBuilder::new(client.clone()));
        Ok(Self::with_parts(options, builder, VersionResolver::new(client)))
    }

    /// Create an orchestrator from explicit collaborators
    pub fn with_parts(
        options: RunOptions,
        builder: Arc<dyn GraphBuilder>,
        resolver: VersionResolver,
    ) -> Self {
        let composer = UpdateComposer::with_filter(Arc::new(resolver), options.filter.clone());
        Self {
            collector: UpdateCollector::new(builder, composer),
            patcher: SourcePatcher::new(),
            writer: ModuleWriter::new(options.dry_run),
            options,
        }
    }

    /// Run the workflow
    ///
    /// Only an invalid root or a failed graph build aborts; patch and write
    /// failures are collected in [`RunResult::errors`].
    pub async fn run(&self, progress: &mut Progress) -> Result<RunResult, AppError> {
        let root = LocalGraphBuilder::root_url(&self.options.root)?;

        progress.spinner(&format!("Collecting updates for {}", self.options.root.display()));
        let collected = self
            .collector
            .collect_dependency_update_all(
                &root,
                CollectOptions {
                    load_remote: self.options.load_remote,
                },
            )
            .await;
        progress.finish_and_clear();
        let mut updates = collected?;
        updates.sort_by(|a, b| {
            (&a.referrer, a.code.map(|c| c.start), &a.dependency.name).cmp(&(
                &b.referrer,
                b.code.map(|c| c.start),
                &b.dependency.name,
            ))
        });

        let mut errors: Vec<AppError> = Vec::new();
        let mut patches = Vec::new();
        let groups = group_by_referrer(&updates);
        progress.files(groups.len(), "Patching");
        for (referrer, group) in &groups {
            progress.set_message(referrer.path());
            match self.patcher.patch_module(referrer, group).await {
                Ok(patch) => patches.push(patch),
                Err(e) => {
                    log::warn!("{}", e);
                    errors.push(e.into());
                }
            }
            progress.inc();
        }
        progress.finish_and_clear();

        let mut write_results = Vec::new();
        for patch in patches.iter().filter(|p| p.is_modified()) {
            match self.writer.write_patch(patch).await {
                Ok(result) => write_results.push(result),
                Err(e) => {
                    log::warn!("{}", e);
                    errors.push(e.into());
                }
            }
        }

        Ok(RunResult {
            root,
            dry_run: self.options.dry_run,
            updates,
            patches,
            write_results,
            errors,
        })
    }
}
