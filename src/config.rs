//! Run configuration
//!
//! This module provides:
//! - The optional `modup.toml` file format
//! - Discovery of the config file next to the root module
//! - Merging of CLI flags over file settings into [`RunOptions`]

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::update::UpdateFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up next to the root module
pub const CONFIG_FILE_NAME: &str = "modup.toml";

/// Settings read from `modup.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub exclude: Vec<String>,
    pub only: Vec<String>,
    pub load_remote: Option<bool>,
}

impl Config {
    /// Parse config text; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load `modup.toml` from the directory of the root module, if present
    pub fn discover(root: &Path) -> Result<Option<Self>, ConfigError> {
        let dir = if root.is_dir() {
            root
        } else {
            root.parent().unwrap_or_else(|| Path::new("."))
        };
        let candidate = dir.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            return Ok(None);
        }
        log::debug!("using config {}", candidate.display());
        Self::load(&candidate).map(Some)
    }
}

/// Effective options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub root: PathBuf,
    pub load_remote: bool,
    pub dry_run: bool,
    pub filter: UpdateFilter,
}

impl RunOptions {
    /// Merge CLI arguments over the config file
    ///
    /// An explicit `--config` must exist; otherwise `modup.toml` is looked up
    /// next to the root module. Non-empty CLI filter lists replace the file's.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.json && args.diff {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --diff cannot be used together".to_string(),
            });
        }
        if !args.root.exists() {
            return Err(ConfigError::InvalidPath {
                path: args.root.clone(),
                message: "root module does not exist".to_string(),
            });
        }

        let config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(&args.root)?.unwrap_or_default(),
        };

        let exclude = if args.exclude.is_empty() {
            config.exclude
        } else {
            args.exclude.clone()
        };
        let only = if args.only.is_empty() {
            config.only
        } else {
            args.only.clone()
        };

        Ok(Self {
            root: args.root.clone(),
            load_remote: args.load_remote || config.load_remote.unwrap_or(false),
            dry_run: args.dry_run,
            filter: UpdateFilter::new().with_exclude(exclude).with_only(only),
        })
    }
}
