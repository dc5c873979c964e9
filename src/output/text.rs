//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-file update listing with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Skipped updates with their reason
//! - Summary line and error listing

use crate::domain::{DependencyUpdate, ModulePatchResult};
use crate::orchestrator::RunResult;
use crate::output::{display_referrer, OutputFormatter, Verbosity};
use crate::update::parse_version;
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        match (parse_version(old), parse_version(new)) {
            (Some(old), Some(new)) if old.major != new.major => VersionChangeType::Major,
            (Some(old), Some(new)) if old.minor != new.minor => VersionChangeType::Minor,
            (Some(_), Some(_)) => VersionChangeType::Patch,
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    dry_run: bool,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    fn dry_run_prefix(&self) -> String {
        match (self.dry_run, self.color) {
            (false, _) => String::new(),
            (true, true) => format!("{} ", "(dry-run)".cyan()),
            (true, false) => "(dry-run) ".to_string(),
        }
    }

    fn format_update_line(&self, update: &DependencyUpdate) -> String {
        let change = VersionChangeType::from_versions(&update.version.from, &update.version.to);
        let location = match (self.verbosity, update.code) {
            (Verbosity::Verbose, Some(span)) => format!(" at {}", span),
            _ => String::new(),
        };

        if self.color {
            format!(
                "  {} {} {} {} ({}){}",
                update.dependency.name.bold(),
                update.version.from.dimmed(),
                "->".dimmed(),
                update.version.to.green(),
                change.colored_label(),
                location
            )
        } else {
            format!(
                "  {} {} -> {} ({}){}",
                update.dependency.name,
                update.version.from,
                update.version.to,
                change.label(),
                location
            )
        }
    }

    fn format_patch(
        &self,
        patch: &ModulePatchResult,
        root: &url::Url,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if patch.applied.is_empty() && patch.skipped.is_empty() {
            return Ok(());
        }

        let path = display_referrer(&patch.referrer, root);
        if self.color {
            writeln!(writer, "{}{}", self.dry_run_prefix(), path.underline())?;
        } else {
            writeln!(writer, "{}{}", self.dry_run_prefix(), path)?;
        }

        for update in &patch.applied {
            writeln!(writer, "{}", self.format_update_line(update))?;
        }

        for (update, reason) in &patch.skipped {
            let line = format!("  {} skipped: {}", update, reason);
            if self.color {
                writeln!(writer, "{}", line.yellow())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }

        writeln!(writer)
    }

    fn summary_line(&self, result: &RunResult) -> String {
        let applied = result.applied_count();
        let files = result.patches.iter().filter(|p| p.is_modified()).count();
        let mut line = if applied == 0 {
            "All imports are up to date".to_string()
        } else if self.dry_run {
            format!("{} update(s) in {} file(s) would be applied", applied, files)
        } else {
            format!(
                "{} update(s) applied, {} file(s) written",
                applied,
                result.files_modified()
            )
        };
        let skipped = result.skipped_count();
        if skipped > 0 {
            line.push_str(&format!(", {} skipped", skipped));
        }
        line
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            for patch in &result.patches {
                self.format_patch(patch, &result.root, writer)?;
            }
        }

        let summary = self.summary_line(result);
        if self.color {
            writeln!(writer, "{}{}", self.dry_run_prefix(), summary.bold())?;
        } else {
            writeln!(writer, "{}{}", self.dry_run_prefix(), summary)?;
        }

        if !result.errors.is_empty() {
            writeln!(writer)?;
            for error in &result.errors {
                if self.color {
                    writeln!(writer, "{} {}", "error:".red().bold(), error)?;
                } else {
                    writeln!(writer, "error: {}", error)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, PatchError};
    use crate::output::fixtures;

    fn render(formatter: &TextFormatter, result: &RunResult) -> String {
        let mut out = Vec::new();
        formatter.format(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_change_type() {
        assert_eq!(
            VersionChangeType::from_versions("1.0.0", "2.0.0"),
            VersionChangeType::Major
        );
        assert_eq!(
            VersionChangeType::from_versions("0.1.0", "0.2.0"),
            VersionChangeType::Minor
        );
        assert_eq!(
            VersionChangeType::from_versions("v3.0.0", "v3.0.1"),
            VersionChangeType::Patch
        );
        assert_eq!(
            VersionChangeType::from_versions("main", "1.0.0"),
            VersionChangeType::Unknown
        );
    }

    #[test]
    fn test_change_type_labels() {
        assert_eq!(VersionChangeType::Major.label(), "major");
        assert_eq!(VersionChangeType::Unknown.label(), "?");
    }

    #[test]
    fn test_format_plain() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let out = render(&formatter, &fixtures::run_result(false));

        assert!(out.contains("main.ts\n"));
        assert!(out.contains("  deno.land/std 0.1.0 -> 0.2.0 (minor)\n"));
        assert!(out.contains("  preact 10.0.0 -> 11.0.0 skipped: no source location\n"));
        assert!(out.contains("1 update(s) applied, 0 file(s) written, 1 skipped"));
        assert!(!out.contains("(dry-run)"));
    }

    #[test]
    fn test_format_dry_run() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, true, false);
        let out = render(&formatter, &fixtures::run_result(true));
        assert!(out.contains("(dry-run) main.ts"));
        assert!(out.contains("(dry-run) 1 update(s) in 1 file(s) would be applied"));
    }

    #[test]
    fn test_format_verbose_shows_location() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false, false);
        let out = render(&formatter, &fixtures::run_result(false));
        assert!(out.contains("(minor) at 1:25-1:65"));
    }

    #[test]
    fn test_format_quiet_only_summary() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false, false);
        let out = render(&formatter, &fixtures::run_result(false));
        assert!(!out.contains("deno.land/std"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_format_up_to_date() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let out = render(&formatter, &fixtures::empty_result());
        assert_eq!(out, "All imports are up to date\n");
    }

    #[test]
    fn test_format_errors() {
        let mut result = fixtures::empty_result();
        result.errors.push(AppError::Patch(PatchError::read_error(
            "/project/lib.ts",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        )));
        let formatter = TextFormatter::with_color(Verbosity::Normal, false, false);
        let out = render(&formatter, &result);
        assert!(out.contains("error: failed to read /project/lib.ts: gone"));
    }
}
