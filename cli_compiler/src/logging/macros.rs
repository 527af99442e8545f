//! Logging macros
//!
//! Each takes a message and optional `"key" => value` pairs, where a value may
//! be anything `Display`. `log_error!` and `log_success!` lead with a `Code`,
//! and `log_error!` accepts `at = position` for events tied to source text.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {
        vec![$(($key, ::std::format!("{}", $value))),*]
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, at = $position:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($position),
            $crate::__log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_with_level(
            $crate::logging::LogEvent::success($code, $message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_with_level(
            $crate::logging::LogEvent::info($message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_with_level(
            $crate::logging::LogEvent::warning($message),
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// The context values are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_with_level(
                $crate::logging::LogEvent::debug($message),
                $crate::__log_context!($($key => $value),*),
            )
        }
    };
}
