//! Leveled diagnostics for the radkit toolkit.
//!
//! The toolkit logs in two registers. Ordinary diagnostics (`error!`,
//! `warn!`, `info!`, `debug!`) report processing problems and progress.
//! Lifecycle tracing (`trace!`) is the high-volume register the object
//! runtime uses on create/clone/destroy paths; it is off by default and
//! the macros compile down to one atomic load when filtered out, so it
//! is cheap to leave in hot code.
//!
//! There is no logger object to construct or pass around: the filter is
//! a single process-wide verbosity threshold, and every line goes to
//! stderr so product output on stdout stays clean.
//!
//! # Example
//!
//! ```
//! use radkit_log::{info, warn, Level};
//!
//! radkit_log::set_verbosity(Level::Debug);
//!
//! let quantity = "DBZH";
//! info!("registering parameter {quantity}");
//! warn!("no calibration coefficients found");
//! ```
//!
//! The `RADKIT_LOG` environment variable selects the threshold at
//! startup (`error`..`trace`, or `quiet` for silence) via
//! [`init_from_env`].

use std::fmt::Arguments;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a log line, most severe first.
///
/// The discriminants leave 0 free for the "quiet" filter state, which is
/// not a level a message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Operation failures.
    Error = 1,
    /// Recoverable anomalies.
    Warn = 2,
    /// Progress and configuration notes.
    Info = 3,
    /// Diagnostic detail.
    Debug = 4,
    /// Per-object lifecycle events.
    Trace = 5,
}

impl Level {
    /// Fixed-width tag used at the start of every log line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

/// Error returned when a verbosity string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl std::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown log level '{}' (expected error, warn, info, debug or trace)",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Filter state: 0 silences everything, otherwise the numeric value of
/// the most verbose level still emitted. Info by default.
static VERBOSITY: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Selects the most verbose level that is still emitted.
pub fn set_verbosity(level: Level) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Silences all output, including errors.
pub fn set_quiet() {
    VERBOSITY.store(0, Ordering::Relaxed);
}

/// Returns the current threshold, or `None` when silenced.
#[must_use]
pub fn verbosity() -> Option<Level> {
    match VERBOSITY.load(Ordering::Relaxed) {
        1 => Some(Level::Error),
        2 => Some(Level::Warn),
        3 => Some(Level::Info),
        4 => Some(Level::Debug),
        5 => Some(Level::Trace),
        _ => None,
    }
}

/// Returns true if a message at `level` would currently be emitted.
#[must_use]
pub fn enabled(level: Level) -> bool {
    level as u8 <= VERBOSITY.load(Ordering::Relaxed)
}

/// Applies the `RADKIT_LOG` environment variable to the filter.
///
/// Accepts a level name or `quiet`/`off`; anything else (including an
/// unset variable) leaves the current threshold in place.
pub fn init_from_env() {
    let Ok(value) = std::env::var("RADKIT_LOG") else {
        return;
    };
    if value.eq_ignore_ascii_case("quiet") || value.eq_ignore_ascii_case("off") {
        set_quiet();
    } else if let Ok(level) = value.parse::<Level>() {
        set_verbosity(level);
    }
}

fn render(level: Level, target: &str, args: Arguments) -> String {
    format!("{} {target}: {args}", level.label())
}

/// Emits an already-filtered log line. Called by the macros; the filter
/// check happens at the call site so skipped lines never format.
#[doc(hidden)]
pub fn __emit(level: Level, target: &str, args: Arguments) {
    eprintln!("{}", render(level, target, args));
}

/// Logs at an explicit level, capturing the module path at the call site.
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::__emit($level, module_path!(), format_args!($($arg)+));
        }
    };
}

/// Logs an operation failure.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

/// Logs a recoverable anomaly.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warn, $($arg)+) };
}

/// Logs progress or configuration notes.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

/// Logs diagnostic detail.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

/// Logs a per-object lifecycle event.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Trace, $($arg)+) };
}
