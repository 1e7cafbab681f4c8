//! Definition extraction for Python source.
//!
//! This module provides:
//! - `SourceEntity`: a function or class definition found in the source
//! - `extract`: parse source text and collect every definition in pre-order
//! - Tree-sitter plumbing: parsing, syntax error location, pre-order walks

pub mod python;
pub mod treesitter;

pub use python::PythonExtractor;

use std::ops::Range;

use crate::error::SyntaxError;

/// The kind of definition an entity was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Function,
    Class,
}

impl EntityKind {
    /// Capitalized label used in report headers.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Function => "Function",
            EntityKind::Class => "Class",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Class => "class",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Location of the syntax subtree that owns an entity.
///
/// For decorated definitions the span starts at the first decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    /// First line (1-indexed)
    pub start_line: usize,
    /// Last line (1-indexed, inclusive)
    pub end_line: usize,
    /// Byte column of the first token (0-indexed)
    pub start_column: usize,
}

impl Span {
    /// Span covering a tree-sitter node.
    pub fn of(node: tree_sitter::Node) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
            start_column: node.start_position().column,
        }
    }
}

/// A function or class definition found in the analyzed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntity {
    pub kind: EntityKind,
    /// The definition name (e.g., "add", "Config")
    pub name: String,
    /// Line of the `def` / `class` keyword (1-indexed)
    pub line: usize,
    /// The subtree this entity owns, used to regenerate its source text.
    pub span: Span,
    /// Byte ranges of comment nodes inside the span.
    pub comments: Vec<Range<usize>>,
    /// Byte ranges of multi-line string literals inside the span.
    pub strings: Vec<Range<usize>>,
}

/// Parse Python source and collect all function and class definitions.
///
/// Definitions are returned in pre-order: an enclosing definition comes
/// before everything nested inside it. An empty vector is not an error.
pub fn extract(source: &str) -> Result<Vec<SourceEntity>, SyntaxError> {
    PythonExtractor::new().extract(source)
}
