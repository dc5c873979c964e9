//! Integration tests for modup
//!
//! These tests verify:
//! - Update collection over a real source tree with the local graph builder
//! - Independent and grouped patching of collected updates
//! - The full run through the orchestrator with network-free registries

use async_trait::async_trait;
use modup::collector::{CollectOptions, UpdateCollector};
use modup::domain::RegistryKind;
use modup::error::RegistryError;
use modup::graph::{GraphBuilder, LocalGraphBuilder};
use modup::registry::{RegistryAdapter, VersionResolver};
use modup::update::UpdateComposer;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

/// Registry adapter answering from an in-memory table
struct FakeRegistry {
    kind: RegistryKind,
    versions: HashMap<&'static str, Vec<String>>,
}

impl FakeRegistry {
    fn new(kind: RegistryKind, entries: &[(&'static str, &[&str])]) -> Arc<Self> {
        let versions = entries
            .iter()
            .map(|(name, list)| (*name, list.iter().map(|v| v.to_string()).collect()))
            .collect();
        Arc::new(Self { kind, versions })
    }
}

#[async_trait]
impl RegistryAdapter for FakeRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn registry_name(&self) -> &'static str {
        self.kind.registry_name()
    }

    async fn fetch_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        tokio::task::yield_now().await;
        self.versions
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(name, self.registry_name()))
    }
}

fn resolver() -> VersionResolver {
    VersionResolver::empty()
        .with_adapter(FakeRegistry::new(
            RegistryKind::Std,
            &[("deno.land/std", &["0.1.0", "0.2.0", "0.3.0-rc.1"])],
        ))
        .with_adapter(FakeRegistry::new(
            RegistryKind::X,
            &[("deno.land/x/hono", &["v3.0.0", "v3.1.0"])],
        ))
        .with_adapter(FakeRegistry::new(
            RegistryKind::Npm,
            &[("node-emoji", &["1.0.0", "2.1.0"]), ("@std/path", &["1.0.0"])],
        ))
}

const MAIN: &str = r#"import { VERSION } from "https://deno.land/std@0.1.0/version.ts";
import { Hono } from 'https://deno.land/x/hono@v3.0.0/mod.ts';
import { join } from "npm:@std/path@1.0.0";
import fs from "node:fs";
import "./lib.ts";
"#;

const LIB: &str = r#"// import "npm:commented@1.0.0";
export { emojify } from "npm:node-emoji@1.0.0";
export * from "https://deno.land/std/fmt/colors.ts";
"#;

/// Project with exactly three upgradeable imports across two files
fn create_project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("main.ts"), MAIN).unwrap();
    fs::write(dir.path().join("lib.ts"), LIB).unwrap();
    dir
}

fn root_url(dir: &TempDir) -> Url {
    LocalGraphBuilder::root_url(&dir.path().join("main.ts")).unwrap()
}

fn collector() -> UpdateCollector {
    let builder: Arc<dyn GraphBuilder> = Arc::new(LocalGraphBuilder::offline());
    UpdateCollector::new(builder, UpdateComposer::new(Arc::new(resolver())))
}

mod collection {
    use super::*;

    #[tokio::test]
    async fn test_collects_three_updates() {
        let dir = create_project();
        let updates = collector()
            .collect_dependency_update_all(&root_url(&dir), CollectOptions::default())
            .await
            .unwrap();

        assert_eq!(updates.len(), 3);
        let names: HashSet<_> = updates.iter().map(|u| u.dependency.name.clone()).collect();
        let expected: HashSet<_> = ["deno.land/std", "deno.land/x/hono", "node-emoji"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_new_specifiers_carry_semver() {
        let dir = create_project();
        let updates = collector()
            .collect_dependency_update_all(&root_url(&dir), CollectOptions::default())
            .await
            .unwrap();

        let semver = regex::Regex::new(r"@v?\d+\.\d+\.\d+").unwrap();
        for update in &updates {
            assert!(semver.is_match(&update.new_specifier()), "{}", update);
            assert!(update.code.is_some());
        }
    }

    #[tokio::test]
    async fn test_referrers_point_at_importing_file() {
        let dir = create_project();
        let updates = collector()
            .collect_dependency_update_all(&root_url(&dir), CollectOptions::default())
            .await
            .unwrap();

        let emoji = updates
            .iter()
            .find(|u| u.dependency.name == "node-emoji")
            .unwrap();
        assert!(emoji.referrer.path().ends_with("/lib.ts"));
        assert_eq!(emoji.version.to, "2.1.0");

        let std = updates
            .iter()
            .find(|u| u.dependency.name == "deno.land/std")
            .unwrap();
        assert!(std.referrer.path().ends_with("/main.ts"));
        assert_eq!(std.version.to, "0.2.0");
    }

    #[tokio::test]
    async fn test_load_remote_without_client_still_collects() {
        let dir = create_project();
        let updates = collector()
            .collect_dependency_update_all(&root_url(&dir), CollectOptions { load_remote: true })
            .await
            .unwrap();
        assert_eq!(updates.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_resolution_is_idempotent() {
        let resolver = resolver();
        let dep = modup::parser::parse_specifier("npm:node-emoji@1.0.0").unwrap();

        let (first, second) = tokio::join!(resolver.resolve_latest(&dep), resolver.resolve_latest(&dep));

        assert_eq!(first.as_deref(), Some("2.1.0"));
        assert_eq!(first, second);
    }
}

mod patching {
    use super::*;
    use modup::patcher::SourcePatcher;

    async fn collect(dir: &TempDir) -> Vec<modup::domain::DependencyUpdate> {
        collector()
            .collect_dependency_update_all(&root_url(dir), CollectOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_exec_single_update_does_not_write() {
        let dir = create_project();
        let updates = collect(&dir).await;
        let emoji = updates
            .iter()
            .find(|u| u.dependency.name == "node-emoji")
            .unwrap();

        let result = SourcePatcher::new()
            .exec_dependency_update(emoji)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            result.content,
            LIB.replace("npm:node-emoji@1.0.0", "npm:node-emoji@2.1.0")
        );
        assert_eq!(fs::read_to_string(dir.path().join("lib.ts")).unwrap(), LIB);
    }

    #[tokio::test]
    async fn test_independent_batch_on_shared_referrer_loses_update() {
        let dir = create_project();
        let updates: Vec<_> = collect(&dir)
            .await
            .into_iter()
            .filter(|u| u.referrer.path().ends_with("/main.ts"))
            .collect();
        assert_eq!(updates.len(), 2);

        let results = SourcePatcher::new().exec_dependency_update_all(&updates).await;
        assert_eq!(results.len(), 2);

        let path = dir.path().join("main.ts");
        for result in &results {
            fs::write(&path, &result.content).unwrap();
        }

        let written = fs::read_to_string(&path).unwrap();
        let applied = ["std@0.2.0", "hono@v3.1.0"]
            .iter()
            .filter(|needle| written.contains(*needle))
            .count();
        assert_eq!(applied, 1, "only the last independent patch survives");
    }

    #[tokio::test]
    async fn test_grouped_patch_keeps_every_update() {
        let dir = create_project();
        let updates = collect(&dir).await;

        let patches = SourcePatcher::new()
            .exec_dependency_update_grouped(&updates)
            .await;

        assert_eq!(patches.len(), 2);
        let main = patches
            .iter()
            .find(|p| p.referrer.path().ends_with("/main.ts"))
            .unwrap();
        assert_eq!(main.applied_count(), 2);
        assert_eq!(
            main.content,
            MAIN.replace("std@0.1.0", "std@0.2.0")
                .replace("hono@v3.0.0", "hono@v3.1.0")
        );
    }
}

mod orchestration {
    use super::*;
    use modup::config::RunOptions;
    use modup::orchestrator::Orchestrator;
    use modup::output::{create_formatter, OutputConfig};
    use modup::progress::Progress;
    use modup::update::UpdateFilter;

    fn orchestrator(dir: &TempDir, dry_run: bool) -> Orchestrator {
        let options = RunOptions {
            root: dir.path().join("main.ts"),
            load_remote: false,
            dry_run,
            filter: UpdateFilter::new(),
        };
        Orchestrator::with_parts(options, Arc::new(LocalGraphBuilder::offline()), resolver())
    }

    #[tokio::test]
    async fn test_run_writes_files() {
        let dir = create_project();
        let result = orchestrator(&dir, false)
            .run(&mut Progress::disabled())
            .await
            .unwrap();

        assert_eq!(result.files_modified(), 2);
        let lib = fs::read_to_string(dir.path().join("lib.ts")).unwrap();
        assert!(lib.contains("\"npm:node-emoji@2.1.0\""));
        assert!(lib.contains("// import \"npm:commented@1.0.0\";"));
    }

    #[tokio::test]
    async fn test_run_json_output() {
        let dir = create_project();
        let result = orchestrator(&dir, true)
            .run(&mut Progress::disabled())
            .await
            .unwrap();

        let formatter = create_formatter(OutputConfig::from_cli(true, false, false, false, true));
        let mut out = Vec::new();
        formatter.format(&result, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["summary"]["updates"], 3);
        assert_eq!(json["summary"]["applied"], 3);
        assert_eq!(json["summary"]["files_modified"], 0);
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("main.ts")).unwrap(), MAIN);
    }

    #[tokio::test]
    async fn test_run_diff_output() {
        let dir = create_project();
        let result = orchestrator(&dir, true)
            .run(&mut Progress::disabled())
            .await
            .unwrap();

        let formatter = create_formatter(OutputConfig::from_cli(false, true, false, false, true));
        let mut out = Vec::new();
        formatter.format(&result, &mut out).unwrap();
        let diff = String::from_utf8(out).unwrap();

        assert!(diff.contains("(dry-run) --- a/lib.ts"));
        assert!(diff.contains("+export { emojify } from \"npm:node-emoji@2.1.0\";"));
        assert!(diff.contains("# 3 update(s) in 2 file(s) would be applied"));
    }
}
