//! Compilation entry points: file or in-memory text to a unit graph

mod error;
mod result;

pub use error::{PipelineError, PipelineResult};
pub use result::UnitGraph;

use crate::config::runtime::{LexicalPreferences, ParserPreferences, RuntimeConfig};
use crate::file_processor::FileProcessor;
use crate::syntax::{DiagnosticReporter, DiagnosticSink, ParserContext, SilentSink, StderrSink};
use crate::{log_debug, log_info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where a session sends diagnostics as they are found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticOutput {
    #[default]
    Stderr,
    Silent,
}

impl DiagnosticOutput {
    fn sink(self) -> Box<dyn DiagnosticSink> {
        match self {
            DiagnosticOutput::Stderr => Box::new(StderrSink),
            DiagnosticOutput::Silent => Box::new(SilentSink),
        }
    }
}

/// Settings shared by every compilation started from this session
#[derive(Debug, Clone, Default)]
pub struct CompilationSession {
    lexical: LexicalPreferences,
    parser: ParserPreferences,
    output: DiagnosticOutput,
}

impl CompilationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            lexical: config.lexical.clone(),
            parser: config.parser.clone(),
            output: DiagnosticOutput::default(),
        }
    }

    /// Append a directory to the search list for bracketed includes
    pub fn with_include_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parser.include_search_paths.push(dir.into());
        self
    }

    pub fn with_output(mut self, output: DiagnosticOutput) -> Self {
        self.output = output;
        self
    }

    pub fn include_search_paths(&self) -> &[PathBuf] {
        &self.parser.include_search_paths
    }

    /// Read and compile a specification file
    pub fn compile_file(&self, path: &Path) -> PipelineResult<UnitGraph> {
        let start = Instant::now();
        log_info!("Starting compilation", "file" => path.display());

        let file = FileProcessor::new().process_file(path)?;
        self.compile(file.source, path, file.metadata.path, start)
    }

    /// Compile in-memory text. `path` names the text in diagnostics and
    /// anchors quoted includes.
    pub fn compile_source(&self, source: &str, path: &Path) -> PipelineResult<UnitGraph> {
        let start = Instant::now();
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.compile(source.to_string(), path, canonical, start)
    }

    fn compile(
        &self,
        source: String,
        path: &Path,
        canonical: PathBuf,
        start: Instant,
    ) -> PipelineResult<UnitGraph> {
        let reporter = DiagnosticReporter::new(self.output.sink());
        let mut ctx = ParserContext::new(self.parser.clone(), self.lexical.clone(), reporter);

        let root = ctx.register_unit(canonical);
        let valid = ctx.parse_unit(source, path, root);
        let (graph, units_by_path, reporter) = ctx.into_parts();

        if !valid {
            log_debug!("Compilation produced errors",
                "file" => path.display(),
                "errors" => reporter.error_count()
            );
            return Err(PipelineError::InvalidInput {
                path: path.to_path_buf(),
                error_count: reporter.error_count(),
                diagnostics: reporter.into_diagnostics(),
            });
        }

        let result = UnitGraph {
            graph,
            root,
            units_by_path,
            processing_duration: start.elapsed(),
        };
        result.log_success(path);
        Ok(result)
    }
}

/// Compile a file with default preferences, reporting to stderr
pub fn compile_file(path: &Path) -> PipelineResult<UnitGraph> {
    CompilationSession::new().compile_file(path)
}

/// Compile in-memory text with default preferences, reporting to stderr
pub fn compile_source(source: &str, path: &Path) -> PipelineResult<UnitGraph> {
    CompilationSession::new().compile_source(source, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;
    use crate::logging::codes;
    use assert_matches::assert_matches;

    fn session() -> CompilationSession {
        CompilationSession::new().with_output(DiagnosticOutput::Silent)
    }

    #[test]
    fn test_valid_source() {
        let result = session()
            .compile_source("class options { bool help; };", Path::new("mem.cli"))
            .unwrap();
        assert_eq!(result.graph.class_count(), 1);
        assert_eq!(result.root_unit().scope.len(), 1);
    }

    #[test]
    fn test_invalid_source_carries_diagnostics() {
        let err = session()
            .compile_source("class options { bool ; };", Path::new("mem.cli"))
            .unwrap_err();

        assert_matches!(&err, PipelineError::InvalidInput { error_count: 1, .. });
        assert_eq!(err.error_code(), codes::syntax::GRAMMAR_VIOLATION);
        assert_eq!(
            err.diagnostics()[0].to_string(),
            "mem.cli:1:22: error: option name expected instead of ';'"
        );
    }

    #[test]
    fn test_empty_source_is_valid() {
        let result = session().compile_source("", Path::new("empty.cli")).unwrap();
        assert!(result.root_unit().scope.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = session()
            .compile_file(Path::new("/definitely/not/here.cli"))
            .unwrap_err();
        assert_matches!(
            err,
            PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_session_from_config() {
        let config = RuntimeConfig::from_toml_str(
            "[parser]\ninclude_search_paths = [\"a\"]\n",
            Path::new("session.toml"),
        )
        .unwrap();
        let session = CompilationSession::from_config(&config).with_include_path("b");
        assert_eq!(
            session.include_search_paths(),
            [PathBuf::from("a"), PathBuf::from("b")]
        );
    }
}
