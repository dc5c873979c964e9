//! Import specifier scanner
//!
//! Finds the string literal of static imports and re-exports
//! (`import x from "a"`, `import "a"`, `export * from "a"`) and literal
//! dynamic imports (`import("a")`), and reports where each literal sits.
//! Literals inside comments or inside other string and template literals
//! are not imports and are left out.

use crate::domain::CodeSpan;
use regex::Regex;
use std::sync::OnceLock;

static SHARED: OnceLock<ImportScanner> = OnceLock::new();

/// A specifier literal found in source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImport {
    /// Specifier without its quotes
    pub specifier: String,
    /// Span of the literal, quotes included
    pub span: CodeSpan,
}

/// Compiled import patterns
#[derive(Debug)]
pub struct ImportScanner {
    import_re: Regex,
}

impl ImportScanner {
    fn compile() -> Self {
        let import_re = Regex::new(
            r#"\b(?:from\s*|import\s*(?:\(\s*)?)(?P<lit>"[^"\r\n]*"|'[^'\r\n]*')"#,
        )
        .unwrap();
        Self { import_re }
    }

    /// Scanner shared by every graph build, compiled on first use
    pub fn shared() -> &'static ImportScanner {
        SHARED.get_or_init(Self::compile)
    }

    /// Scan source text for import specifiers in source order
    pub fn scan(&self, text: &str) -> Vec<ScannedImport> {
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        let literals = literal_starts(text);

        self.import_re
            .captures_iter(text)
            .filter_map(|caps| {
                let lit = caps.name("lit")?;
                if literals.binary_search(&lit.start()).is_err() {
                    return None;
                }

                let line = line_starts.partition_point(|&start| start <= lit.start()) - 1;
                let before = &text[line_starts[line]..lit.start()];
                let start = before.chars().count();
                let end = start + lit.as_str().chars().count();
                let quoted = lit.as_str();
                Some(ScannedImport {
                    specifier: quoted[1..quoted.len() - 1].to_string(),
                    span: CodeSpan::single_line(line, start, end),
                })
            })
            .collect()
    }
}

/// Byte offsets of the quotes opening `"` and `'` literals in code
///
/// Comments and the bodies of string and template literals are skipped, so
/// quotes inside them are never reported.
fn literal_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = text[i + 2..].find('\n').map_or(bytes.len(), |end| i + 2 + end);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = text[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |end| i + 2 + end + 2);
            }
            quote @ (b'"' | b'\'' | b'`') => {
                if quote != b'`' {
                    starts.push(i);
                }
                i = skip_literal(bytes, i + 1, quote);
            }
            _ => i += 1,
        }
    }
    starts
}

/// Index just past the literal closed by `quote`
///
/// Quoted strings also end at an unescaped newline; templates run until the
/// closing backtick.
fn skip_literal(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
