//! Diff output formatter for showing changes
//!
//! Every modified referrer is printed as a line diff of the original text
//! against the patched text. Patches only rewrite within a line, so lines
//! are compared pairwise.

use crate::domain::ModulePatchResult;
use crate::orchestrator::RunResult;
use crate::output::{display_referrer, OutputFormatter};
use std::io::Write;

/// Diff formatter for showing patched lines
pub struct DiffFormatter {
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }

    fn format_patch(
        &self,
        patch: &ModulePatchResult,
        path: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        writeln!(writer, "{}--- a/{}", prefix, path)?;
        writeln!(writer, "{}+++ b/{}", prefix, path)?;

        let before = patch.original.split('\n');
        let after = patch.content.split('\n');
        for (index, (old, new)) in before.zip(after).enumerate() {
            if old == new {
                continue;
            }
            writeln!(writer, "@@ -{0} +{0} @@", index + 1)?;
            writeln!(writer, "-{}", old.trim_end_matches('\r'))?;
            writeln!(writer, "+{}", new.trim_end_matches('\r'))?;
        }

        writeln!(writer)
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for patch in result.patches.iter().filter(|p| p.is_modified()) {
            let path = display_referrer(&patch.referrer, &result.root);
            self.format_patch(patch, &path, writer)?;
        }

        let files = result.patches.iter().filter(|p| p.is_modified()).count();
        let verb = if self.dry_run { "would be applied" } else { "applied" };
        writeln!(
            writer,
            "{}# {} update(s) in {} file(s) {}",
            self.dry_run_prefix(),
            result.applied_count(),
            files,
            verb
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    fn render(formatter: &DiffFormatter, result: &RunResult) -> String {
        let mut out = Vec::new();
        formatter.format(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_diff_changed_line_only() {
        let out = render(&DiffFormatter::new(false), &fixtures::run_result(false));

        assert!(out.starts_with("--- a/main.ts\n+++ b/main.ts\n@@ -1 +1 @@\n"));
        assert!(out.contains(
            "-import { VERSION } from \"https://deno.land/std@0.1.0/version.ts\";\n"
        ));
        assert!(out.contains(
            "+import { VERSION } from \"https://deno.land/std@0.2.0/version.ts\";\n"
        ));
        assert!(!out.contains("preact"));
        assert!(out.ends_with("# 1 update(s) in 1 file(s) applied\n"));
    }

    #[test]
    fn test_diff_dry_run_prefix() {
        let out = render(&DiffFormatter::new(true), &fixtures::run_result(true));
        assert!(out.starts_with("(dry-run) --- a/main.ts\n"));
        assert!(out.contains("(dry-run) # 1 update(s) in 1 file(s) would be applied"));
    }

    #[test]
    fn test_diff_nothing_to_show() {
        let out = render(&DiffFormatter::new(false), &fixtures::empty_result());
        assert_eq!(out, "# 0 update(s) in 0 file(s) applied\n");
    }
}
