//! Named integer settings and the option lists a settings panel offers for them.

use crate::core::error::AdapterError;
use crate::host::{
    Host, SettingsStore, ORIENTATION_DEFAULT, ORIENTATION_SETTING, TRACKING_DEFAULT,
    TRACKING_SETTING,
};
use crate::sensor::{ProcessingMode, SensorError, SensorOrientation, TrackerConfiguration};
use serde::{Deserialize, Serialize};

/// Read the tracker configuration from the host settings.
///
/// Values outside the known option ranges are rejected as a tracker creation failure.
pub fn tracker_configuration(
    settings: &dyn SettingsStore,
) -> Result<TrackerConfiguration, AdapterError> {
    let tracking = settings.get_setting(TRACKING_SETTING, TRACKING_DEFAULT);
    let orientation = settings.get_setting(ORIENTATION_SETTING, ORIENTATION_DEFAULT);

    let processing_mode = ProcessingMode::try_from(tracking).map_err(|v| {
        AdapterError::TrackerCreate(SensorError::TrackerUnavailable(format!(
            "unsupported {TRACKING_SETTING} setting {v}"
        )))
    })?;
    let sensor_orientation = SensorOrientation::try_from(orientation).map_err(|v| {
        AdapterError::TrackerCreate(SensorError::TrackerUnavailable(format!(
            "unsupported {ORIENTATION_SETTING} setting {v}"
        )))
    })?;

    Ok(TrackerConfiguration {
        processing_mode,
        sensor_orientation,
    })
}

/// One selectable value of a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOption {
    pub value: i32,
    pub label: String,
}

/// A setting with its localized label, options and current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingChoice {
    pub key: String,
    pub label: String,
    pub options: Vec<SettingOption>,
    pub selected: i32,
}

impl SettingChoice {
    pub fn contains(&self, value: i32) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

fn choice(host: &dyn Host, key: &str, default: i32, count: usize) -> SettingChoice {
    let options = (0..count as i32)
        .map(|value| SettingOption {
            value,
            label: host.request_localized_string(&format!("/Interface/Options/{key}/{value}")),
        })
        .collect();
    SettingChoice {
        key: key.to_string(),
        label: host.request_localized_string(&format!("/Interface/Options/{key}/Select")),
        options,
        selected: host.settings().get_setting(key, default),
    }
}

/// The processing mode and orientation choices, labelled through the host.
pub fn settings_options(host: &dyn Host) -> [SettingChoice; 2] {
    [
        choice(
            host,
            TRACKING_SETTING,
            TRACKING_DEFAULT,
            ProcessingMode::ALL.len(),
        ),
        choice(
            host,
            ORIENTATION_SETTING,
            ORIENTATION_DEFAULT,
            SensorOrientation::ALL.len(),
        ),
    ]
}
