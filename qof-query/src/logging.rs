//! Logging setup for qof.
//!
//! Builder and compiler events are emitted with `tracing`. Nothing is printed
//! unless a subscriber is installed, either by the application or by [`init`]
//! (requires the `tracing-subscriber` feature).
//!
//! # Environment Variables
//!
//! - `QOF_DEBUG=true` / `QOF_DEBUG=1` - Enable debug logging
//! - `QOF_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `QOF_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! ```rust,no_run
//! use qof_query::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `QOF_DEBUG`.
///
/// Returns `true` if `QOF_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("QOF_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `QOF_LOG_LEVEL`.
///
/// Defaults to "debug" if `QOF_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };

    match env::var("QOF_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `QOF_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("QOF_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the qof logging system.
///
/// Subsequent calls are no-ops. Does nothing unless `QOF_DEBUG` or
/// `QOF_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("QOF_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "qof={},qof_query={},qof_sql={},qof_predicate={}",
                level, level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match get_log_format() {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(
                    level = level,
                    format = get_log_format(),
                    "qof logging initialized"
                );
            }
        }
    });
}

/// Debug event gated on `QOF_DEBUG` at runtime.
#[macro_export]
macro_rules! qof_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Trace event gated on `QOF_DEBUG` at runtime.
#[macro_export]
macro_rules! qof_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
