//! Errors raised while parsing specification files
//!
//! Every variant renders to the exact message printed after `error:` in the
//! diagnostic line.

use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::semantics::SemanticError;
use crate::tokens::Token;
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected {expected} instead of {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("{message}")]
    GrammarViolation { message: String, span: Span },

    #[error("{0}")]
    Lexical(#[from] LexerError),

    #[error("{what} nesting exceeds maximum depth of {max}")]
    MaxDepthExceeded {
        what: &'static str,
        max: usize,
        span: Span,
    },

    #[error("{source}")]
    Semantic { source: SemanticError, span: Span },

    #[error("unable to find include file '{path}'")]
    IncludeNotFound { path: String, span: Span },

    #[error("invalid include path '{path}'")]
    InvalidIncludePath { path: String, span: Span },

    #[error("unable to open '{path}': {reason}")]
    IncludeUnreadable {
        path: String,
        reason: String,
        span: Span,
    },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &str, found: &Token, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    pub fn grammar_violation(message: impl Into<String>, span: Span) -> Self {
        Self::GrammarViolation {
            message: message.into(),
            span,
        }
    }

    pub fn semantic(source: SemanticError, span: Span) -> Self {
        Self::Semantic { source, span }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::GrammarViolation { .. } => codes::syntax::GRAMMAR_VIOLATION,
            Self::Lexical(err) => err.error_code(),
            Self::MaxDepthExceeded { what, .. } => {
                if *what == "include" {
                    codes::semantic::INCLUDE_DEPTH_EXCEEDED
                } else {
                    codes::syntax::MAX_RECURSION_DEPTH
                }
            }
            Self::Semantic { source, .. } => source.error_code(),
            Self::IncludeNotFound { .. } => codes::semantic::INCLUDE_NOT_FOUND,
            Self::InvalidIncludePath { .. } => codes::semantic::INVALID_INCLUDE_PATH,
            Self::IncludeUnreadable { .. } => codes::semantic::INCLUDE_IO_ERROR,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Lexical(err) => err.span(),
            Self::UnexpectedToken { span, .. }
            | Self::GrammarViolation { span, .. }
            | Self::MaxDepthExceeded { span, .. }
            | Self::Semantic { span, .. }
            | Self::IncludeNotFound { span, .. }
            | Self::InvalidIncludePath { span, .. }
            | Self::IncludeUnreadable { span, .. } => *span,
        }
    }

    /// Lexical errors are resynchronized by the lexer side of the parser
    /// before they are returned.
    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical(_))
    }
}
