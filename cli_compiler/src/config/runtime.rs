// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable names read by the preference defaults
pub mod env_vars {
    pub const LEXICAL_JOIN_ADJACENT_STRINGS: &str = "CLI_LEXICAL_JOIN_ADJACENT_STRINGS";
    pub const LEXICAL_LOG_TOKENS: &str = "CLI_LEXICAL_LOG_TOKENS";
    pub const PARSER_INCLUDE_PATH: &str = "CLI_INCLUDE_PATH";
    pub const PARSER_LOG_INCLUDES: &str = "CLI_PARSER_LOG_INCLUDES";
    pub const PARSER_LOG_SCOPES: &str = "CLI_PARSER_LOG_SCOPES";
    pub const LOGGING_USE_STRUCTURED: &str = "CLI_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CLI_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CLI_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "CLI_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether string literals separated only by whitespace form one token
    pub join_adjacent_strings: bool,

    /// Whether every produced token is logged at debug level
    pub log_tokens: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            join_adjacent_strings: env::var(env_vars::LEXICAL_JOIN_ADJACENT_STRINGS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_tokens: env::var(env_vars::LEXICAL_LOG_TOKENS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Directories searched, in order, for bracketed `<...>` includes
    pub include_search_paths: Vec<PathBuf>,

    /// Whether include resolution steps are logged
    pub log_include_resolution: bool,

    /// Whether scope entry and exit are logged at debug level
    pub log_scope_transitions: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            include_search_paths: env::var_os(env_vars::PARSER_INCLUDE_PATH)
                .map(|v| env::split_paths(&v).collect())
                .unwrap_or_default(),
            log_include_resolution: env::var(env_vars::PARSER_LOG_INCLUDES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_scope_transitions: env::var(env_vars::PARSER_LOG_SCOPES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text; missing sections keep their defaults
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, RuntimeConfigError> {
        toml::from_str(content).map_err(|source| RuntimeConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }
}
