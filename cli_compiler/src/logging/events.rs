//! Log events emitted by the compiler stages

use super::codes::{self, Code};
use crate::utils::Position;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// One log record. `position` is set for events mirrored from a diagnostic.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<Position>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            position: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    /// Warnings have no codes of their own and share `W000`
    pub fn warning(message: &str) -> Self {
        Self::with_level(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    /// `[LEVEL] CODE - message at line:column (file)`
    pub fn format(&self) -> String {
        let mut text = format!("[{}] {} - {}", self.level.as_str(), self.code, self.message);
        if let Some(position) = self.position {
            text.push_str(&format!(" at {}", position));
        }
        if let Some(file) = self.context.get("file") {
            text.push_str(&format!(" ({})", file));
        }
        text
    }

    /// One JSON object; error events also carry the code registry entry
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let code = self.code.as_str();
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": code,
            "message": self.message,
            "category": codes::get_category(code),
        });

        if self.is_error() {
            json["error"] = serde_json::json!({
                "severity": codes::get_severity(code).as_str(),
                "recoverable": codes::is_recoverable(code),
                "description": codes::get_description(code),
            });
        }

        if let Some(position) = self.position {
            json["line"] = position.line.into();
            json["column"] = position.column.into();
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}
