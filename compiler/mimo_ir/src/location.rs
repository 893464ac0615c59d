//! File/line/column positions attached to tokens and AST nodes.

use std::fmt;
use std::sync::Arc;

use crate::Span;

/// Position of a token or node in a source file.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

impl Location {
    pub fn new(file: Arc<str>, line: u32, column: u32, span: Span) -> Self {
        Location {
            file,
            line,
            column,
            span,
        }
    }

    /// Location for values and errors that have no source position.
    pub fn synthetic(file: impl Into<Arc<str>>) -> Self {
        Location {
            file: file.into(),
            line: 0,
            column: 0,
            span: Span::DUMMY,
        }
    }

    /// Absolute byte offset of the first character.
    #[inline]
    pub fn start(&self) -> u32 {
        self.span.start
    }

    /// Length in bytes.
    #[inline]
    pub fn length(&self) -> u32 {
        self.span.len()
    }

    /// A location spanning from `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Location) -> Location {
        Location {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column,
            span: self.span.merge(other.span),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} @ {:?}", self.file, self.line, self.column, self.span)
    }
}
