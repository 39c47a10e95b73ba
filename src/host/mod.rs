//! The host side of the adapter boundary.
//!
//! A host supplies three collaborators: a log sink, a localized string lookup
//! and a store of named integer settings. The adapter never logs, translates or
//! persists anything on its own.

pub mod console;
pub mod memory;
pub mod strings;

pub use console::ConsoleHost;
pub use memory::MemoryHost;

/// Settings key for the tracker processing mode.
pub const TRACKING_SETTING: &str = "Tracking";
/// Default processing mode (DirectML).
pub const TRACKING_DEFAULT: i32 = 4;
/// Settings key for the sensor mounting orientation.
pub const ORIENTATION_SETTING: &str = "Orientation";
/// Default sensor orientation.
pub const ORIENTATION_DEFAULT: i32 = 0;

/// Severity of a log line sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl std::fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogSeverity::Info => write!(f, "INFO"),
            LogSeverity::Warning => write!(f, "WARNING"),
            LogSeverity::Error => write!(f, "ERROR"),
            LogSeverity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Named integer settings, each read with a caller supplied default.
pub trait SettingsStore {
    fn get_setting(&self, key: &str, default: i32) -> i32;
    fn set_setting(&mut self, key: &str, value: i32);
}

/// Everything the adapter needs from the application hosting it.
pub trait Host {
    /// Write a message to the host log.
    fn log(&self, message: &str, severity: LogSeverity);

    /// Write an error, including its source chain, to the host log.
    fn log_error(&self, error: &dyn std::error::Error, severity: LogSeverity) {
        self.log(&error_chain(error), severity);
    }

    /// Resolve a localized string by key.
    fn request_localized_string(&self, key: &str) -> String;

    fn settings(&self) -> &dyn SettingsStore;

    fn settings_mut(&mut self) -> &mut dyn SettingsStore;

    /// Language code for documentation links, if the host knows one.
    fn docs_language_code(&self) -> Option<&str> {
        None
    }
}

/// Render an error and its sources as `outer: inner: innermost`.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
