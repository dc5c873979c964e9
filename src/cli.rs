//! CLI argument parsing module for modup

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Version bumper for URL and registry module imports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modup",
    version,
    about = "Update versioned module imports (deno.land/std, deno.land/x, npm:) in place"
)]
pub struct CliArgs {
    /// Root module to walk (default: main.ts)
    #[arg(default_value = "main.ts")]
    pub root: PathBuf,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Walk into remote http(s) modules instead of treating them as leaves
    #[arg(long)]
    pub load_remote: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a config file (default: modup.toml next to the root module)
    #[arg(long, env = "MODUP_CONFIG")]
    pub config: Option<PathBuf>,

    // Dependency filters
    /// Exclude specific dependencies from update (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Update only specific dependencies (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Returns true if progress spinners should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
