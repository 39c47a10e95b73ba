//! In-memory host that records what the adapter logs.

use crate::host::{strings, Host, LogSeverity, SettingsStore};
use std::cell::RefCell;
use std::collections::HashMap;

/// Settings held in a plain map.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, i32>,
}

impl SettingsStore for MemorySettings {
    fn get_setting(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_setting(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }
}

/// A host that keeps settings in memory and records every log line.
///
/// Strings resolve through overrides added with [`MemoryHost::with_string`],
/// then through the built-in English table; unknown keys resolve to the key
/// itself.
#[derive(Debug, Default)]
pub struct MemoryHost {
    settings: MemorySettings,
    strings: HashMap<String, String>,
    language: Option<String>,
    logs: RefCell<Vec<(LogSeverity, String)>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setting(mut self, key: &str, value: i32) -> Self {
        self.settings.set_setting(key, value);
        self
    }

    pub fn with_string(mut self, key: &str, text: &str) -> Self {
        self.strings.insert(key.to_string(), text.to_string());
        self
    }

    pub fn with_language(mut self, code: &str) -> Self {
        self.language = Some(code.to_string());
        self
    }

    /// Every line logged so far.
    pub fn logs(&self) -> Vec<(LogSeverity, String)> {
        self.logs.borrow().clone()
    }

    /// Lines logged at `severity` or above.
    pub fn logs_at_least(&self, severity: LogSeverity) -> Vec<String> {
        self.logs
            .borrow()
            .iter()
            .filter(|(s, _)| *s >= severity)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn clear_logs(&self) {
        self.logs.borrow_mut().clear();
    }
}

impl Host for MemoryHost {
    fn log(&self, message: &str, severity: LogSeverity) {
        self.logs.borrow_mut().push((severity, message.to_string()));
    }

    fn request_localized_string(&self, key: &str) -> String {
        if let Some(text) = self.strings.get(key) {
            return text.clone();
        }
        strings::english(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    fn settings(&self) -> &dyn SettingsStore {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut dyn SettingsStore {
        &mut self.settings
    }

    fn docs_language_code(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_and_override() {
        let mut host = MemoryHost::new().with_setting("Tracking", 1);
        assert_eq!(host.settings().get_setting("Tracking", 4), 1);
        assert_eq!(host.settings().get_setting("Orientation", 0), 0);

        host.settings_mut().set_setting("Orientation", 2);
        assert_eq!(host.settings().get_setting("Orientation", 0), 2);
    }

    #[test]
    fn test_records_logs() {
        let host = MemoryHost::new();
        host.log("hello", LogSeverity::Info);
        host.log("boom", LogSeverity::Error);

        assert_eq!(host.logs().len(), 2);
        assert_eq!(host.logs_at_least(LogSeverity::Warning), vec!["boom"]);
        host.clear_logs();
        assert!(host.logs().is_empty());
    }

    #[test]
    fn test_string_lookup_fallbacks() {
        let host = MemoryHost::new().with_string("/Custom", "custom text");
        assert_eq!(host.request_localized_string("/Custom"), "custom text");
        assert!(host
            .request_localized_string(strings::STATUS_SUCCESS)
            .contains("Code 0"));
        assert_eq!(host.request_localized_string("/Missing"), "/Missing");
    }
}
