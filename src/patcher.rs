//! Span-localized source patching
//!
//! This module provides:
//! - Pure text substitution of one specifier literal at its code span
//! - Single and independent batch patching that read the referrer fresh per update
//! - Grouped patching that applies every update for a referrer to one buffer
//!
//! The patcher never writes; persisting the returned content is left to
//! [`crate::writer::ModuleWriter`].

use crate::domain::{DependencyUpdate, ModulePatchResult, ModuleUpdateResult, PatchSkip};
use crate::error::PatchError;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::PathBuf;
use url::Url;

/// Quote characters accepted around a specifier literal
const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Replace the specifier literal covered by `update.code` in `text`
///
/// The span must still cover `update.specifier` wrapped in one quote
/// character. The literal is rewritten as the new specifier in that same
/// quote. Everything outside the span, including line endings, is left
/// untouched.
pub fn patch_text(text: &str, update: &DependencyUpdate) -> Result<String, PatchSkip> {
    let span = update.code.ok_or(PatchSkip::MissingSpan)?;
    if !span.is_single_line() {
        return Err(PatchSkip::MultiLineSpan);
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    let line = *lines
        .get(span.start.line)
        .ok_or(PatchSkip::SpanOutOfRange)?;
    let body = line.strip_suffix('\r').unwrap_or(line);

    let (start, end) = (span.start.character, span.end.character);
    if start > end || end > body.chars().count() {
        return Err(PatchSkip::SpanOutOfRange);
    }

    let start_byte = char_to_byte(body, start);
    let end_byte = char_to_byte(body, end);
    let quote = quoted_literal(&body[start_byte..end_byte], &update.specifier)
        .ok_or(PatchSkip::SpanMismatch)?;

    let patched = format!(
        "{}{quote}{}{quote}{}",
        &line[..start_byte],
        update.new_specifier(),
        &line[end_byte..]
    );
    lines[span.start.line] = &patched;

    Ok(lines.join("\n"))
}

/// The quote around `specifier` if `literal` is exactly that quoted specifier
fn quoted_literal(literal: &str, specifier: &str) -> Option<char> {
    let quote = literal.chars().next().filter(|c| QUOTES.contains(c))?;
    let inner = literal.strip_prefix(quote)?.strip_suffix(quote)?;
    (inner == specifier).then_some(quote)
}

fn char_to_byte(s: &str, index: usize) -> usize {
    s.char_indices()
        .nth(index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Local path of a referrer, or `None` for non-file URLs
fn referrer_path(referrer: &Url) -> Option<PathBuf> {
    if referrer.scheme() != "file" {
        return None;
    }
    referrer.to_file_path().ok()
}

/// Group updates by referrer, preserving input order within each group
pub fn group_by_referrer(updates: &[DependencyUpdate]) -> BTreeMap<Url, Vec<DependencyUpdate>> {
    let mut groups: BTreeMap<Url, Vec<DependencyUpdate>> = BTreeMap::new();
    for update in updates {
        groups
            .entry(update.referrer.clone())
            .or_default()
            .push(update.clone());
    }
    groups
}

/// Applies dependency updates to referrer source text
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcePatcher;

impl SourcePatcher {
    pub fn new() -> Self {
        Self
    }

    /// Apply one update to the referrer's current text
    ///
    /// Returns `Ok(None)` (with a warning) when the update has no span, a
    /// multi-line span, a span outside the file or over different text, or a
    /// non-file referrer.
    /// Read failures are returned to the caller.
    pub async fn exec_dependency_update(
        &self,
        update: &DependencyUpdate,
    ) -> Result<Option<ModuleUpdateResult>, PatchError> {
        if let Err(skip) = check_span(update) {
            log::warn!("{}: {}: {}", update.referrer, update.specifier, skip);
            return Ok(None);
        }

        let Some(path) = referrer_path(&update.referrer) else {
            log::warn!(
                "{}: {}: {}",
                update.referrer,
                update.specifier,
                PatchSkip::RemoteReferrer
            );
            return Ok(None);
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| PatchError::read_error(&path, e))?;

        match patch_text(&text, update) {
            Ok(content) => Ok(Some(ModuleUpdateResult {
                update: update.clone(),
                content,
            })),
            Err(skip) => {
                log::warn!("{}: {}: {}", update.referrer, update.specifier, skip);
                Ok(None)
            }
        }
    }

    /// Apply each update independently and return the successes
    ///
    /// Every update reads its referrer afresh, so two results for the same
    /// referrer are each based on the unpatched text. Writing both keeps only
    /// the last one; use [`Self::exec_dependency_update_grouped`] for that case.
    pub async fn exec_dependency_update_all(
        &self,
        updates: &[DependencyUpdate],
    ) -> Vec<ModuleUpdateResult> {
        let mut results = Vec::new();
        for update in updates {
            match self.exec_dependency_update(update).await {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => log::warn!("{}", e),
            }
        }
        results
    }

    /// Apply every update for one referrer to a single buffer
    ///
    /// Edits are applied in descending (line, character) order so earlier
    /// spans stay valid. An edit overlapping one already applied is skipped.
    pub async fn patch_module(
        &self,
        referrer: &Url,
        updates: &[DependencyUpdate],
    ) -> Result<ModulePatchResult, PatchError> {
        let Some(path) = referrer_path(referrer) else {
            let mut result = ModulePatchResult::new(referrer.clone(), String::new());
            for update in updates {
                log::warn!("{}: {}: {}", referrer, update.specifier, PatchSkip::RemoteReferrer);
                result.skipped.push((update.clone(), PatchSkip::RemoteReferrer));
            }
            return Ok(result);
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| PatchError::read_error(&path, e))?;

        Ok(apply_all(referrer.clone(), text, updates))
    }

    /// Group updates by referrer and patch each group in one pass
    ///
    /// A referrer that cannot be read is logged and left out.
    pub async fn exec_dependency_update_grouped(
        &self,
        updates: &[DependencyUpdate],
    ) -> Vec<ModulePatchResult> {
        let mut results = Vec::new();
        for (referrer, group) in group_by_referrer(updates) {
            match self.patch_module(&referrer, &group).await {
                Ok(result) => results.push(result),
                Err(e) => log::warn!("{}", e),
            }
        }
        results
    }
}

fn check_span(update: &DependencyUpdate) -> Result<(), PatchSkip> {
    match update.code {
        None => Err(PatchSkip::MissingSpan),
        Some(span) if !span.is_single_line() => Err(PatchSkip::MultiLineSpan),
        Some(_) => Ok(()),
    }
}

/// Apply `updates` to `text` in descending span order
pub fn apply_all(referrer: Url, text: String, updates: &[DependencyUpdate]) -> ModulePatchResult {
    let mut result = ModulePatchResult::new(referrer, text);

    let mut ordered: Vec<&DependencyUpdate> = updates.iter().collect();
    ordered.sort_by_key(|u| Reverse(u.code.map(|span| span.start)));

    let mut applied_spans = Vec::new();
    for update in ordered {
        let outcome = check_span(update).and_then(|()| {
            let span = update.code.ok_or(PatchSkip::MissingSpan)?;
            if applied_spans.iter().any(|applied| span.overlaps(applied)) {
                return Err(PatchSkip::Overlapping);
            }
            let content = patch_text(&result.content, update)?;
            Ok((span, content))
        });

        match outcome {
            Ok((span, content)) => {
                result.content = content;
                applied_spans.push(span);
                result.applied.push(update.clone());
            }
            Err(skip) => {
                log::warn!("{}: {}: {}", result.referrer, update.specifier, skip);
                result.skipped.push((update.clone(), skip));
            }
        }
    }

    result
}
