//! Syntax analysis: parser, diagnostics and the text helpers it relies on

pub mod diagnostics;
pub mod error;
pub mod fundamental;
pub mod parser;
pub mod text;

pub use diagnostics::{Diagnostic, DiagnosticReporter, DiagnosticSink, SilentSink, StderrSink};
pub use error::{SyntaxError, SyntaxResult};
pub use fundamental::FundamentalType;
pub use parser::ParserContext;
pub use text::{normalize_doc, strip_unescaped_quotes};
