// This file implements the application's logging system.
// It provides macros for the different log levels (INFO, WARN, ERROR, DEBUG)
// and only prints debug messages when debug mode was switched on at startup.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Logging macros, exported at the crate root so every module can use
/// `crate::log_info!` and friends without importing `colored` itself.

// `log_info!` for general progress and status lines.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => (eprintln!("{} {}", colored::Colorize::bright_green("[INFO]"), format!($($arg)*)));
}

// `log_warn!` for best-effort steps that failed and tools that went missing.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => (eprintln!("{} {}", colored::Colorize::bright_yellow("[WARN]"), format!($($arg)*)));
}

// `log_error!` for failures that end an ensurer or the whole run.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => (eprintln!("{} {}", colored::Colorize::bright_red("[ERROR]"), format!($($arg)*)));
}

// `log_debug!` for command lines, probe results and configuration dumps.
// Messages are only printed if debug mode is enabled via `is_debug_enabled()`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
           eprintln!("{} {}", colored::Colorize::dimmed("[DEBUG]"), format!($($arg)*));
        }
    };
}

// Global flag controlling debug output, initialized once.
static DEBUG_ENABLED: OnceLock<AtomicBool> = OnceLock::new();

/// Initializes the logger, setting the global debug mode.
/// Called once from `main` before any command runs.
///
/// # Arguments
/// * `debug`: If `true`, enables debug logging; otherwise only info, warn and error messages are printed.
pub fn init(debug: bool) {
    DEBUG_ENABLED
        .get_or_init(|| AtomicBool::new(debug))
        .store(debug, Ordering::Relaxed);

    if debug {
        log_debug!("Logger initialized in DEBUG mode");
    }
}

/// Checks if debug logging is currently enabled.
/// Returns `false` if `init` was never called (e.g. in unit tests).
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED
        .get()
        .map(|f| f.load(Ordering::Relaxed))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_follows_latest_init() {
        init(true);
        assert!(is_debug_enabled());
        init(false);
        assert!(!is_debug_enabled());
    }
}
