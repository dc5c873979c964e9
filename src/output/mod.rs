//! Output formatting for run results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Diff output for showing changes

mod diff;
mod json;
mod text;

pub use diff::DiffFormatter;
pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::orchestrator::RunResult;
use std::io::Write;
use url::Url;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
    /// Line diff of every patched file
    Diff,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary and errors only
    Quiet,
    #[default]
    Normal,
    /// Adds source locations
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    pub dry_run: bool,
}

impl OutputConfig {
    /// Create configuration from CLI flags
    pub fn from_cli(json: bool, diff: bool, verbose: bool, quiet: bool, dry_run: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else if diff {
            OutputFormat::Diff
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            dry_run,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a run result
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.verbosity, config.dry_run)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Diff => Box::new(DiffFormatter::new(config.dry_run)),
    }
}

/// Referrer shown relative to the root module's directory when possible
pub(crate) fn display_referrer(referrer: &Url, root: &Url) -> String {
    if let (Ok(path), Ok(root)) = (referrer.to_file_path(), root.to_file_path()) {
        if let Some(relative) = root.parent().and_then(|dir| path.strip_prefix(dir).ok()) {
            return relative.display().to_string();
        }
        return path.display().to_string();
    }
    referrer.to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_diff() {
        let config = OutputConfig::from_cli(false, true, false, false, true);
        assert_eq!(config.format, OutputFormat::Diff);
        assert!(config.dry_run);
    }

    #[test]
    fn test_output_config_verbosity() {
        let verbose = OutputConfig::from_cli(false, false, true, false, false);
        assert_eq!(verbose.verbosity, Verbosity::Verbose);
        let quiet = OutputConfig::from_cli(false, false, false, true, false);
        assert_eq!(quiet.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_display_referrer_relative_to_root_dir() {
        let root = Url::parse("file:///project/main.ts").unwrap();
        let lib = Url::parse("file:///project/src/lib.ts").unwrap();
        assert_eq!(display_referrer(&lib, &root), "src/lib.ts");
        assert_eq!(display_referrer(&root, &root), "main.ts");
    }

    #[test]
    fn test_display_referrer_outside_root_dir() {
        let root = Url::parse("file:///project/main.ts").unwrap();
        let other = Url::parse("file:///other/mod.ts").unwrap();
        assert_eq!(display_referrer(&other, &root), "/other/mod.ts");
    }

    #[test]
    fn test_display_referrer_remote() {
        let root = Url::parse("file:///project/main.ts").unwrap();
        let remote = Url::parse("https://example.com/mod.ts").unwrap();
        assert_eq!(display_referrer(&remote, &root), "https://example.com/mod.ts");
    }
}
