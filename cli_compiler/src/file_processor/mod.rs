//! File processing for specification files and their includes

mod processor;

pub use processor::{
    is_cli_path, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
    CLI_EXTENSION,
};

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use std::path::Path;

/// Process a file with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// The compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}
