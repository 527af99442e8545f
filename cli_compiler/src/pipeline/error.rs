use crate::config::RuntimeConfigError;
use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::syntax::Diagnostic;
use std::path::PathBuf;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Compilation errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] RuntimeConfigError),

    /// The file was read but contained errors. Each diagnostic has already
    /// been emitted to the session's sink.
    #[error("{error_count} error(s) in {path:?}")]
    InvalidInput {
        path: PathBuf,
        error_count: usize,
        diagnostics: Vec<Diagnostic>,
    },
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(err) => err.error_code(),
            Self::Configuration(_) => codes::system::INITIALIZATION_FAILURE,
            Self::InvalidInput { diagnostics, .. } => diagnostics
                .first()
                .map(|d| d.code)
                .unwrap_or(codes::syntax::UNEXPECTED_TOKEN),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::InvalidInput { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}
