//! Patch outcome types

use super::DependencyUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Reason why an update could not be applied to source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchSkip {
    /// The graph builder could not locate the specifier literal
    MissingSpan,
    /// The specifier literal spans several lines
    MultiLineSpan,
    /// The span lies outside the current file text
    SpanOutOfRange,
    /// The text at the span is no longer the quoted specifier
    SpanMismatch,
    /// Another update already rewrote part of this span
    Overlapping,
    /// The referrer is not a local file
    RemoteReferrer,
}

impl fmt::Display for PatchSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchSkip::MissingSpan => write!(f, "no source location"),
            PatchSkip::MultiLineSpan => write!(f, "specifier spans multiple lines"),
            PatchSkip::SpanOutOfRange => write!(f, "source location out of range"),
            PatchSkip::SpanMismatch => write!(f, "source text changed at location"),
            PatchSkip::Overlapping => write!(f, "overlaps another update"),
            PatchSkip::RemoteReferrer => write!(f, "referrer is not a local file"),
        }
    }
}

/// All updates for one referrer applied to a single buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePatchResult {
    pub referrer: Url,
    /// Text before any update was applied
    #[serde(skip)]
    pub original: String,
    /// Text after all applicable updates
    pub content: String,
    pub applied: Vec<DependencyUpdate>,
    pub skipped: Vec<(DependencyUpdate, PatchSkip)>,
}

impl ModulePatchResult {
    /// Creates a result with nothing applied yet
    pub fn new(referrer: Url, original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            referrer,
            content: original.clone(),
            original,
            applied: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns true if the content differs from the original
    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }

    /// Returns the number of applied updates
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_display() {
        assert_eq!(
            PatchSkip::MultiLineSpan.to_string(),
            "specifier spans multiple lines"
        );
        assert_eq!(PatchSkip::MissingSpan.to_string(), "no source location");
    }

    #[test]
    fn test_new_result_is_unmodified() {
        let result = ModulePatchResult::new(Url::parse("file:///a.ts").unwrap(), "x");
        assert!(!result.is_modified());
        assert_eq!(result.applied_count(), 0);
        assert_eq!(result.content, "x");
    }
}
