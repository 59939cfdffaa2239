//! Logging infrastructure for propwise.
//!
//! Operations emit `tracing` events: `debug` for per-call summaries (how
//! many properties were copied, how many constraints were built, which
//! incompatible properties were skipped) and `trace` for per-property
//! detail. Nothing is printed unless a subscriber is installed.
//!
//! # Environment Variables
//!
//! - `PROPWISE_DEBUG=true|1|yes` - Enable debug logging
//! - `PROPWISE_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `PROPWISE_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use propwise_core::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `PROPWISE_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("PROPWISE_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `PROPWISE_LOG_LEVEL`.
///
/// Defaults to "debug" if `PROPWISE_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("PROPWISE_LOG_LEVEL") {
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

/// Get the configured log format from `PROPWISE_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("PROPWISE_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the propwise logging system.
///
/// Does nothing unless `PROPWISE_DEBUG` or `PROPWISE_LOG_LEVEL` is set.
/// Subsequent calls are no-ops. Without the `tracing-subscriber` feature
/// no subscriber is installed; install your own instead.
pub fn init() {
    if !is_debug_enabled() && env::var("PROPWISE_LOG_LEVEL").is_err() {
        return;
    }
    install(get_log_level());
}

/// Initialize logging with a specific level, ignoring `PROPWISE_LOG_LEVEL`.
///
/// Unknown levels fall back to `warn`. Only the first initialization in a
/// process takes effect.
pub fn init_with_level(level: &str) {
    install(level);
}

fn install(level: &str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "propwise={},propwise_core={}",
                level, level
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
                    "propwise logging initialized"
                );
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        let _ = level;
    });
}

/// Macro for conditional debug logging.
///
/// Only logs if `PROPWISE_DEBUG` is enabled at runtime. Callers do not need
/// their own `tracing` dependency.
#[macro_export]
macro_rules! propwise_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            $crate::__tracing::debug!($($arg)*);
        }
    };
}
