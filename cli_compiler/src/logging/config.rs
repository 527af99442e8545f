//! Runtime logging preferences and the compile-time log limits

use crate::config::compile_time::logging::{MAX_LOG_EVENTS_PER_FILE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; only the first call takes effect
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

/// Events a `MemoryLogger` keeps before dropping the rest
pub fn get_max_log_events() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Clamp a message to the compile-time maximum, on a char boundary
pub fn truncate_message(message: &str) -> &str {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message;
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}
