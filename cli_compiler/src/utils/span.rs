//! Positions in option files
//!
//! Lines and columns count from 1, offsets from 0. Tokens carry a `Span`,
//! diagnostics a `Position`, and graph nodes a `Location` naming their file.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset of the character
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position after reading `ch`. Only `\n` starts a new line; a tab is
    /// one column like any other character.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.offset + 1, self.line + 1, 1)
        } else {
            Self::new(self.offset + ch.len_utf8(), self.line, self.column + 1)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start.offset <= end.offset, "span ends before it starts");
        Self { start, end }
    }

    /// Zero-width span, used where only the start of a construct is known
    pub fn point(position: Position) -> Self {
        Self::new(position, position)
    }
}

/// A token or other value paired with where it was read
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

/// Where a graph node was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: &Path, position: Position) -> Self {
        Self {
            file: file.to_path_buf(),
            line: position.line,
            column: position.column,
        }
    }
}
