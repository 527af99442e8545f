//! Lexical analysis: character cursor and token scanner

pub mod cursor;
pub mod lexer;

pub use cursor::SourceCursor;
pub use lexer::{tokenize, Lexer, LexerError, LexerResult, LexicalMetrics};
