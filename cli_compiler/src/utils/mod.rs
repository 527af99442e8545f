//! Shared primitive types used by the lexer, parser and semantic graph.

pub mod span;

pub use span::{Location, Position, Span, Spanned};
