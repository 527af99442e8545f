//! Token definitions shared by the lexer and the parser

pub mod token;

pub use token::{Keyword, PathKind, Punctuation, Token};

use crate::utils::Spanned;

/// A token together with the source span it was read from
pub type SpannedToken = Spanned<Token>;
