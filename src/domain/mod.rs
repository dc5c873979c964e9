//! Core domain models for modup
//!
//! This module contains the fundamental types used throughout the application:
//! - Registry kinds recognised in specifiers
//! - Parsed dependency structures
//! - Source code spans
//! - Dependency update records and patch outcomes

mod dependency;
mod patch_result;
mod registry_kind;
mod span;
mod update;

pub use dependency::Dependency;
pub use patch_result::{ModulePatchResult, PatchSkip};
pub use registry_kind::{RegistryKind, DENO_LAND_HOST};
pub use span::{CodeSpan, Position};
pub use update::{DependencyRef, DependencyUpdate, ModuleUpdateResult, VersionChange};
