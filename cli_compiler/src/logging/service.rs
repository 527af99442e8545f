//! Logging service and logger backends

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level-filtering front for a logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Backend and level chosen by the runtime logging preferences.
    /// Structured output wins over console output when both are enabled.
    pub fn from_preferences() -> Self {
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else if config::use_console_logging() {
            Arc::new(ConsoleLogger)
        } else {
            Arc::new(NullLogger)
        };

        Self::new(logger, config::get_min_log_level())
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain text to stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// One JSON object per line on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Keeps events in memory, up to the compile-time event limit
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() < config::get_max_log_events() {
                events.push(event.clone());
            }
        }
    }
}
