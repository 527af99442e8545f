//! Global logging for the compiler
//!
//! One process-wide `LoggingService` plus a per-thread record of the file
//! being parsed, so events raised deep inside an include carry that file.
//! Until `init_global_logging` runs every macro is a no-op, and library users
//! only see the compiler diagnostics they asked for.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::Position;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<LoggingService> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = RefCell::new(None);
}

/// The option file currently being parsed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
    /// Include nesting depth; 0 for the root file
    pub depth: usize,
}

/// Install the global logger built from the runtime preferences. Call
/// `config::init_runtime_preferences` first if the defaults are not wanted.
pub fn init_global_logging() -> Result<(), String> {
    for code in [
        codes::system::INTERNAL_ERROR,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::UNEXPECTED_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    GLOBAL_LOGGER
        .set(LoggingService::from_preferences())
        .map_err(|_| "Global logger already initialized".to_string())?;

    log_with_level(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        ),
        Vec::new(),
    );
    Ok(())
}

fn global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get()
}

/// Whether debug events would reach the logger
pub fn debug_enabled() -> bool {
    global_logger().is_some_and(|logger| logger.should_log(LogLevel::Debug))
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Run `f` with `file_path` as the current file, restoring the previous
/// context afterwards so nested includes unwind correctly.
pub fn with_file_context<F, R>(file_path: PathBuf, depth: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.borrow_mut().replace(FileContext { file_path, depth }));
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

fn attach_context(mut event: LogEvent, context: Vec<(&str, String)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, &value);
    }

    if config::include_file_context() && !event.context.contains_key("file") {
        if let Some(file_ctx) = get_current_file_context() {
            event = event.with_context("file", &file_ctx.file_path.display().to_string());
            if file_ctx.depth > 0 {
                event = event.with_context("include_depth", &file_ctx.depth.to_string());
            }
        }
    }

    event
}

/// Backs `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<Position>,
    context: Vec<(&str, String)>,
) {
    let Some(logger) = global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, config::truncate_message(message));
    if let Some(position) = position {
        event = event.at(position);
    }
    logger.log_event(attach_context(event, context));
}

/// Backs the non-error macros
pub fn log_with_level(event: LogEvent, context: Vec<(&str, String)>) {
    if let Some(logger) = global_logger() {
        if logger.should_log(event.level) {
            logger.log_event(attach_context(event, context));
        }
    }
}
