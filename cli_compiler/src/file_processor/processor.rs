//! Reads specification files from disk under the compile-time limits

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of option specification files
pub const CLI_EXTENSION: &str = "cli";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("file too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("{message}")]
    IoError { message: String },

    #[error("invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("file has {lines} lines (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path },
            _ => FileProcessorError::IoError {
                message: format!("failed to read '{}': {}", path, error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_cli_file: bool,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Log size and timing of every processed file
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Validate, canonicalize and read a specification file
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();
        let display = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;

        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => display,
                "size_human" => metadata.human_readable_size(),
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        let source = fs::read_to_string(&path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, file_path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => display,
                "io_error" => e);
            error
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => display,
                "lines" => line_count);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => display,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms,
                "is_large_file" => result.metadata.is_large_file()
            );
        }

        Ok(result)
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            return Err(FileProcessorError::FileNotFound {
                path: file_path.display().to_string(),
            });
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path.display());
            return Err(error);
        }

        file_path
            .canonicalize()
            .map_err(|e| FileProcessorError::from_io(&e, file_path))
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_io(&e, path))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_cli_file = extension.as_deref() == Some(CLI_EXTENSION);

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_cli_file,
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an include path names a specification file rather than a C++ header
pub fn is_cli_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CLI_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("options.cli");
        let content = "class options\n{\n};\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.source, content);
        assert_eq!(result.metadata.line_count, 3);
        assert!(result.metadata.is_cli_file);
        assert!(result.metadata.path.is_absolute());
        assert!(!result.metadata.is_large_file());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.cli");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.metadata.size, 0);
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file(Path::new("nonexistent.cli"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.cli");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_cli_path_detection() {
        assert!(is_cli_path("base.cli"));
        assert!(is_cli_path("dir/base.cli"));
        assert!(!is_cli_path("string"));
        assert!(!is_cli_path("types.hxx"));
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.cli"),
            size: 2048,
            extension: Some("cli".into()),
            line_count: 0,
            is_cli_file: true,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }
}
