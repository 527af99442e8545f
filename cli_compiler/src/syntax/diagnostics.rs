//! User-facing compiler diagnostics
//!
//! Each error is printed as `<path>:<line>:<column>: error: <message>` the
//! moment it is detected. Diagnostics are also mirrored into the structured
//! log, which stays silent unless logging was initialized.

use crate::config::compile_time::logging::MAX_ERROR_COLLECTION;
use crate::{log_error, log_warning};
use crate::logging::Code;
use crate::utils::Position;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub position: Position,
    pub message: String,
    pub code: Code,
}

impl Diagnostic {
    pub fn new(path: &Path, position: Position, message: impl Into<String>, code: Code) -> Self {
        Self {
            path: path.to_path_buf(),
            position,
            message: message.into(),
            code,
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: error: {}",
            self.path.display(),
            self.position.line,
            self.position.column,
            self.message
        )
    }
}

/// Destination for diagnostics as they are produced
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Prints each diagnostic to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        eprintln!("{}", diagnostic);
    }
}

/// Discards diagnostics; the reporter still records them
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn emit(&mut self, _diagnostic: &Diagnostic) {}
}

/// Counts every reported diagnostic and keeps the first
/// `MAX_ERROR_COLLECTION` of them for the caller.
pub struct DiagnosticReporter {
    sink: Box<dyn DiagnosticSink>,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticReporter {
    pub fn new(sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            diagnostics: Vec::new(),
            error_count: 0,
        }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(StderrSink))
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSink))
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        log_error!(diagnostic.code, &diagnostic.message,
            at = diagnostic.position,
            "file" => diagnostic.path.display()
        );

        self.sink.emit(&diagnostic);
        self.error_count += 1;

        if self.diagnostics.len() < MAX_ERROR_COLLECTION {
            self.diagnostics.push(diagnostic);
        } else if self.error_count == MAX_ERROR_COLLECTION + 1 {
            log_warning!("Diagnostic limit reached; further errors are counted only",
                "limit" => MAX_ERROR_COLLECTION
            );
        }
    }

    /// Total errors reported, including any beyond the collection limit
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl fmt::Debug for DiagnosticReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticReporter")
            .field("diagnostics", &self.diagnostics)
            .field("error_count", &self.error_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_diagnostic_format() {
        let diagnostic = Diagnostic::new(
            Path::new("options.cli"),
            Position::new(10, 3, 7),
            "expected ';' instead of '}'",
            codes::syntax::UNEXPECTED_TOKEN,
        );
        assert_eq!(
            diagnostic.to_string(),
            "options.cli:3:7: error: expected ';' instead of '}'"
        );
    }

    #[test]
    fn test_reporter_counts_and_collects() {
        let mut reporter = DiagnosticReporter::silent();
        assert!(!reporter.has_errors());

        reporter.report(Diagnostic::new(
            Path::new("a.cli"),
            Position::start(),
            "first",
            codes::syntax::UNEXPECTED_TOKEN,
        ));
        reporter.report(Diagnostic::new(
            Path::new("a.cli"),
            Position::start(),
            "second",
            codes::syntax::GRAMMAR_VIOLATION,
        ));

        assert_eq!(reporter.error_count(), 2);
        let messages: Vec<_> = reporter.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    struct Recording(std::rc::Rc<std::cell::RefCell<Vec<String>>>);

    impl DiagnosticSink for Recording {
        fn emit(&mut self, diagnostic: &Diagnostic) {
            self.0.borrow_mut().push(diagnostic.to_string());
        }
    }

    #[test]
    fn test_sink_receives_diagnostics_immediately() {
        let lines = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut reporter = DiagnosticReporter::new(Box::new(Recording(lines.clone())));

        reporter.report(Diagnostic::new(
            Path::new("b.cli"),
            Position::new(0, 1, 1),
            "boom",
            codes::syntax::UNEXPECTED_TOKEN,
        ));

        assert_eq!(lines.borrow().as_slice(), ["b.cli:1:1: error: boom"]);
    }

    #[test]
    fn test_collection_is_capped_but_count_is_not() {
        let mut reporter = DiagnosticReporter::silent();
        for _ in 0..MAX_ERROR_COLLECTION + 3 {
            reporter.report(Diagnostic::new(
                Path::new("c.cli"),
                Position::start(),
                "again",
                codes::syntax::UNEXPECTED_TOKEN,
            ));
        }

        assert_eq!(reporter.error_count(), MAX_ERROR_COLLECTION + 3);
        assert_eq!(reporter.diagnostics().len(), MAX_ERROR_COLLECTION);
    }
}
