//! Source-text coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Run of source text occupied by a specifier string literal, quotes included.
///
/// Half-open on the character axis. Characters are Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeSpan {
    pub start: Position,
    pub end: Position,
}

impl CodeSpan {
    /// Creates a span
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a span on a single line
    pub fn single_line(line: usize, start: usize, end: usize) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }

    /// Returns true if start and end lie on the same line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns true if two single-line spans share any character
    pub fn overlaps(&self, other: &CodeSpan) -> bool {
        self.start.line == other.start.line
            && self.start.character < other.end.character
            && other.start.character < self.end.character
    }
}

impl fmt::Display for CodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line + 1,
            self.start.character + 1,
            self.end.line + 1,
            self.end.character + 1
        )
    }
}
