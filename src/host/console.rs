//! Host used by the command line tool: logs through `tracing`, reads settings
//! from the configuration file.

use crate::config::Config;
use crate::host::{strings, Host, LogSeverity, SettingsStore};

/// A host backed by [`Config`] with `tracing` as its log sink.
#[derive(Debug, Clone)]
pub struct ConsoleHost {
    config: Config,
    language: Option<String>,
}

impl ConsoleHost {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            language: None,
        }
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the configuration back, including any settings written by the adapter.
    pub fn into_config(self) -> Config {
        self.config
    }
}

impl Host for ConsoleHost {
    fn log(&self, message: &str, severity: LogSeverity) {
        match severity {
            LogSeverity::Info => tracing::info!(target: "depth_body", "{message}"),
            LogSeverity::Warning => tracing::warn!(target: "depth_body", "{message}"),
            LogSeverity::Error | LogSeverity::Fatal => {
                tracing::error!(target: "depth_body", severity = %severity, "{message}")
            }
        }
    }

    fn request_localized_string(&self, key: &str) -> String {
        strings::english(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    fn settings(&self) -> &dyn SettingsStore {
        &self.config
    }

    fn settings_mut(&mut self) -> &mut dyn SettingsStore {
        &mut self.config
    }

    fn docs_language_code(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TRACKING_SETTING;

    #[test]
    fn test_settings_write_through_to_config() {
        let mut host = ConsoleHost::new(Config::default());
        host.settings_mut().set_setting(TRACKING_SETTING, 1);
        assert_eq!(host.into_config().get_setting(TRACKING_SETTING, 4), 1);
    }

    #[test]
    fn test_strings_resolve_to_english() {
        let host = ConsoleHost::new(Config::default()).with_language("de");
        assert!(host
            .request_localized_string(strings::STATUS_NOT_AVAILABLE)
            .starts_with("Not available"));
        assert_eq!(host.docs_language_code(), Some("de"));
    }
}
