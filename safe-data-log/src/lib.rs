//! Diagnostic logging for safe-data
//!
//! The validation engine is silent by default. Setting `SAFE_DATA_DEBUG=1`
//! (or a lower `SAFE_DATA_LOG_LEVEL`) makes every rejected value visible,
//! which is usually the fastest way to find out why a schema refuses an input.
//!
//! # Usage
//!
//! ```rust
//! use safe_data_log::{debug, trace, warn};
//!
//! trace!("checking value");
//! let code = "NUMBER_MIN";
//! debug!(target: "safe_data::schema", "rejected with {}", code);
//! warn!("schema configured twice");
//! ```
//!
//! # Environment Variables
//!
//! - `SAFE_DATA_DEBUG=1` - Enable debug logging
//! - `SAFE_DATA_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `SAFE_DATA_LOG_FORMAT=pretty|compact|json|facade` - Set output format
//! - `SAFE_DATA_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `SAFE_DATA_LOG_MODULE=1|0` - Include the log target

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Levels and formats
// ============================================================================

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Every rejected value, including nested member failures
    Trace = 0,
    /// Rejections at the outermost schema
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Logging disabled
    Off = 5,
}

impl Level {
    /// Upper-case level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    fn to_log(self) -> Option<log::Level> {
        match self {
            Level::Trace => Some(log::Level::Trace),
            Level::Debug => Some(log::Level::Debug),
            Level::Info => Some(log::Level::Info),
            Level::Warn => Some(log::Level::Warn),
            Level::Error => Some(log::Level::Error),
            Level::Off => None,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, one record per line on stderr
    Pretty,
    /// Short single-letter level prefix on stderr
    Compact,
    /// One JSON object per line on stderr
    Json,
    /// Hand records to the `log` crate facade (or `tracing`, with that feature)
    Facade,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            "facade" | "log" => Ok(Format::Facade),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

// ============================================================================
// Global configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Pretty,
            timestamps: true,
            module_path: true,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Build the configuration from `SAFE_DATA_*` variables and publish the
    /// level to the global atomics.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("SAFE_DATA_DEBUG").unwrap_or(false);

        let level = env::var("SAFE_DATA_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("SAFE_DATA_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        let config = Self {
            debug,
            level,
            format,
            timestamps: env_flag("SAFE_DATA_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
            module_path: env_flag("SAFE_DATA_LOG_MODULE").unwrap_or(defaults.module_path),
        };

        DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
        LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
        config
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment now instead of on the first log call.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Whether records at `level` are currently emitted.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the level at runtime. Overrides `SAFE_DATA_LOG_LEVEL`.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime; enabling it lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

// ============================================================================
// Output
// ============================================================================

/// Emit one record. Called by the macros, which check the level first.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    let config = config();
    match config.format {
        Format::Pretty => write_pretty(level, target, message, config),
        Format::Compact => write_compact(level, target, message, config),
        Format::Json => write_json(level, target, message),
        Format::Facade => forward(level, target, message),
    }
}

fn write_pretty(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(stderr, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }
    let _ = write!(stderr, "{:5} ", level.as_str());
    if config.module_path && !target.is_empty() {
        let _ = write!(stderr, "[{}] ", target);
    }
    let _ = writeln!(stderr, "{}", message);
}

fn write_compact(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();

    if config.timestamps {
        let _ = write!(stderr, "{} ", chrono::Local::now().format("%H:%M:%S"));
    }
    let initial = level.as_str().chars().next().unwrap_or('?');
    if config.module_path && !target.is_empty() {
        let _ = writeln!(stderr, "{} {}: {}", initial, target, message);
    } else {
        let _ = writeln!(stderr, "{} {}", initial, message);
    }
}

#[cfg(feature = "json")]
fn write_json(level: Level, target: &str, message: &str) {
    #[derive(serde::Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };
    if let Ok(line) = serde_json::to_string(&record) {
        eprintln!("{}", line);
    }
}

#[cfg(not(feature = "json"))]
fn write_json(level: Level, target: &str, message: &str) {
    eprintln!(
        "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"target\":{},\"message\":{}}}",
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        json_string(target),
        json_string(message)
    );
}

/// `s` as a quoted JSON string.
#[cfg(any(test, not(feature = "json")))]
fn json_string(s: &str) -> String {
    use std::fmt::Write as _;

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(not(feature = "tracing"))]
fn forward(level: Level, target: &str, message: &str) {
    if let Some(level) = level.to_log() {
        log::log!(target: target, level, "{}", message);
    }
}

// tracing metadata is static, so the dynamic target travels as a field.
#[cfg(feature = "tracing")]
fn forward(level: Level, target: &str, message: &str) {
    match level.to_log() {
        Some(log::Level::Trace) => tracing::trace!(target: "safe_data", origin = target, "{}", message),
        Some(log::Level::Debug) => tracing::debug!(target: "safe_data", origin = target, "{}", message),
        Some(log::Level::Info) => tracing::info!(target: "safe_data", origin = target, "{}", message),
        Some(log::Level::Warn) => tracing::warn!(target: "safe_data", origin = target, "{}", message),
        Some(log::Level::Error) => tracing::error!(target: "safe_data", origin = target, "{}", message),
        None => {}
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Log a trace record. Nested schema failures are reported at this level.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug record.
///
/// Emitted at level `Debug` or below; `SAFE_DATA_DEBUG=1` lowers the
/// default level to `Debug`.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!(" TRACE ".parse::<Level>(), Ok(Level::Trace));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("none".parse::<Level>(), Ok(Level::Off));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("Compact".parse::<Format>(), Ok(Format::Compact));
        assert_eq!("log".parse::<Format>(), Ok(Format::Facade));
        assert!("xml".parse::<Format>().is_err());
    }

    // The level is process-global, so everything that mutates it lives in one test.
    #[test]
    fn test_runtime_level_changes() {
        let original_level = current_level();
        let original_debug = is_debug_enabled();

        set_level(Level::Trace);
        assert!(!is_level_enabled(Level::Off));
        assert!(is_level_enabled(Level::Error));

        set_level(Level::Error);
        assert_eq!(current_level(), Level::Error);
        assert!(!is_level_enabled(Level::Warn));

        set_debug(true);
        assert!(is_debug_enabled());
        assert_eq!(current_level(), Level::Debug);

        // An explicit level still wins over debug mode.
        set_level(Level::Warn);
        assert!(is_debug_enabled());
        assert!(!is_level_enabled(Level::Debug));

        set_debug(original_debug);
        set_level(original_level);
    }

    #[test]
    fn test_json_string_escaping() {
        assert_eq!(json_string("plain"), "\"plain\"");
        assert_eq!(json_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(json_string("C:\\tmp\t"), r#""C:\\tmp\t""#);
        assert_eq!(json_string("\u{1b}[0m"), r#""\u001b[0m""#);

        let escaped = json_string("bell \u{7} and \u{1b}");
        let parsed: String = serde_json::from_str(&escaped).unwrap();
        assert_eq!(parsed, "bell \u{7} and \u{1b}");
    }

    #[test]
    fn test_macros_expand() {
        trace!("trace record");
        debug!("debug record {}", 1);
        info!(target: "safe_data::test", "info record");
        warn!(target: "safe_data::test", "warn record {}", "x");
        error!("error record");
    }
}
