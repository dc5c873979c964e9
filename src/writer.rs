//! Persisting patched module text
//!
//! This module provides:
//! - ModuleWriter for writing patch results back to referrer files
//! - Dry-run mode support (no actual file modifications)

use crate::domain::ModulePatchResult;
use crate::error::PatchError;
use std::path::PathBuf;

/// Writer for referrer files
#[derive(Debug, Clone, Copy)]
pub struct ModuleWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of writing one referrer
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the referrer file
    pub path: PathBuf,
    /// Number of updates contained in the written content
    pub updates_applied: usize,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

impl ModuleWriter {
    /// Create a new ModuleWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write the content of a grouped patch result
    ///
    /// Unmodified results and dry runs produce a result without touching the
    /// filesystem.
    pub async fn write_patch(&self, patch: &ModulePatchResult) -> Result<WriteResult, PatchError> {
        let path = patch
            .referrer
            .to_file_path()
            .unwrap_or_else(|_| PathBuf::from(patch.referrer.as_str()));
        let mut result = WriteResult {
            path,
            updates_applied: patch.applied_count(),
            file_modified: false,
        };

        if patch.is_modified() && !self.dry_run {
            tokio::fs::write(&result.path, &patch.content)
                .await
                .map_err(|e| PatchError::write_error(&result.path, e))?;
            log::info!(
                "wrote {} ({} update(s))",
                result.path.display(),
                result.updates_applied
            );
            result.file_modified = true;
        }

        Ok(result)
    }
}
