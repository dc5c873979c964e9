//! Update filter configuration
//!
//! This module provides the UpdateFilter struct that decides which
//! dependency names are considered for an update.

/// Filter configuration applied before version resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateFilter {
    /// Dependency names to exclude from updates
    pub exclude: Vec<String>,
    /// If non-empty, only update these dependency names
    pub only: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter that lets every dependency through
    pub fn new() -> Self {
        Self::default()
    }

    /// Set names to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set names to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a dependency should be processed based on filters
    ///
    /// A pattern matches the full registry-qualified name or its last
    /// segment, so `hono` selects `deno.land/x/hono`.
    pub fn should_process(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.iter().any(|p| Self::matches(p, name));
        }
        !self.exclude.iter().any(|p| Self::matches(p, name))
    }

    fn matches(pattern: &str, name: &str) -> bool {
        pattern == name || name.rsplit('/').next() == Some(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_processes_all() {
        let filter = UpdateFilter::new();
        assert!(filter.should_process("deno.land/std"));
        assert!(filter.should_process("preact"));
    }

    #[test]
    fn test_filter_exclude() {
        let filter = UpdateFilter::new().with_exclude(vec!["preact".to_string()]);
        assert!(!filter.should_process("preact"));
        assert!(filter.should_process("chalk"));
    }

    #[test]
    fn test_filter_exclude_last_segment() {
        let filter = UpdateFilter::new().with_exclude(vec!["hono".to_string()]);
        assert!(!filter.should_process("deno.land/x/hono"));
        assert!(filter.should_process("deno.land/x/oak"));
    }

    #[test]
    fn test_filter_only() {
        let filter = UpdateFilter::new().with_only(vec!["deno.land/std".to_string()]);
        assert!(filter.should_process("deno.land/std"));
        assert!(!filter.should_process("preact"));
    }

    #[test]
    fn test_filter_only_wins_over_exclude() {
        let filter = UpdateFilter::new()
            .with_only(vec!["preact".to_string()])
            .with_exclude(vec!["preact".to_string()]);
        assert!(filter.should_process("preact"));
    }

    #[test]
    fn test_filter_scoped_package() {
        let filter = UpdateFilter::new().with_only(vec!["@preact/signals".to_string()]);
        assert!(filter.should_process("@preact/signals"));
        assert!(!filter.should_process("preact"));
    }
}
