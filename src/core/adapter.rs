//! The host-facing tracking adapter.
//!
//! A host drives the adapter with `initialize` once, `update` every tick and
//! `shutdown` once, and reads joints and status back through accessors. No call
//! here panics or returns an error the host must handle: failures are logged
//! through the host and surface as flags, status codes and return values.

use crate::core::error::AdapterError;
use crate::core::lifecycle::{DeviceLifecycleManager, LifecycleState};
use crate::core::pump::TickOutcome;
use crate::core::settings::{self, SettingChoice};
use crate::diagnostics::{PumpStats, PumpStatsSnapshot};
use crate::host::{
    error_chain, strings, Host, LogSeverity, ORIENTATION_SETTING, TRACKING_SETTING,
};
use crate::joints::{TrackedJoint, TrackedJointStore};
use crate::sensor::{ProcessingMode, SensorBackend, SensorOrientation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base of the troubleshooting documentation links.
pub const ERROR_DOCS_BASE: &str = "https://docs.k2vr.tech";

/// Optional features a tracking device may provide, and whether this adapter does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterCapabilities {
    /// The device asks the host to skip position filtering
    pub position_filter_blocking: bool,
    /// The device overrides host physics
    pub physics_override: bool,
    /// The device updates itself instead of being ticked
    pub self_update: bool,
    /// The host may flip the skeleton when the user turns around
    pub flip_supported: bool,
    /// The host may compute orientations for this device
    pub app_orientation_supported: bool,
    /// The device exposes a settings panel
    pub settings_daemon_supported: bool,
}

/// Capabilities of the depth body adapter.
pub const CAPABILITIES: AdapterCapabilities = AdapterCapabilities {
    position_filter_blocking: false,
    physics_override: false,
    self_update: false,
    flip_supported: true,
    app_orientation_supported: true,
    settings_daemon_supported: true,
};

fn undefined_status(code: i32) -> String {
    format!(
        "Undefined: {code}\nE_UNDEFINED\nSomething weird has happened, though we can't tell what."
    )
}

/// Body tracking adapter over a sensor backend `B`, reporting to host `H`.
pub struct TrackingAdapter<B: SensorBackend, H: Host> {
    lifecycle: DeviceLifecycleManager<B>,
    host: H,
    joints: TrackedJointStore,
    stats: PumpStats,
    initialized: bool,
    loaded: bool,
    instance_id: Uuid,
}

impl<B: SensorBackend, H: Host> TrackingAdapter<B, H> {
    pub fn new(backend: B, host: H) -> Self {
        Self {
            lifecycle: DeviceLifecycleManager::new(backend),
            host,
            joints: TrackedJointStore::new(),
            stats: PumpStats::new(),
            initialized: false,
            loaded: false,
            instance_id: Uuid::new_v4(),
        }
    }

    /// Mark the adapter as loaded by the host. Status strings are only
    /// localized after this.
    pub fn on_load(&mut self) {
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Open and configure the sensor and its tracker.
    ///
    /// Reads the processing mode and orientation settings, logs the resulting
    /// status, and returns whether the whole setup succeeded. A running session
    /// is shut down first.
    pub fn initialize(&mut self) -> Result<(), AdapterError> {
        if self.lifecycle.has_handles() {
            self.shutdown();
        }

        let result = settings::tracker_configuration(self.host.settings())
            .and_then(|config| self.lifecycle.initialize(&config));

        if let Err(e) = &result {
            self.host.log(
                &format!("Failed to open the sensor! Message: {}", error_chain(e)),
                LogSeverity::Error,
            );
        }
        self.initialized = result.is_ok();

        self.host.log(
            &format!(
                "Tried to initialize the sensor ({}) with status: {}",
                self.instance_id,
                self.device_status_string()
            ),
            LogSeverity::Info,
        );
        result
    }

    /// Release the sensor. Never fails; teardown errors are logged.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.lifecycle.shutdown() {
            self.host.log_error(&e, LogSeverity::Error);
        }
        self.initialized = false;
    }

    /// Advance tracking by one frame.
    pub fn update(&mut self) -> TickOutcome {
        self.stats.record_tick();
        let dropped = self.stats.captures_dropped();
        let result = self.lifecycle.pump(&mut self.joints, &self.stats);
        if self.stats.captures_dropped() > dropped {
            self.host.log(
                "Body tracker queue is full, dropped a capture",
                LogSeverity::Warning,
            );
        }
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.stats.record_failure();
                self.host.log_error(&e, LogSeverity::Error);
                TickOutcome::Failed(e)
            }
        }
    }

    /// Haptic/signal requests are accepted and ignored.
    pub fn signal_joint(&mut self, _joint_index: usize) {}

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_skeleton_tracked(&self) -> bool {
        self.joints.is_skeleton_tracked()
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// 0 when the sensor is available, 1 otherwise.
    pub fn device_status(&self) -> i32 {
        self.lifecycle.device_status()
    }

    /// Human readable status for [`TrackingAdapter::device_status`].
    pub fn device_status_string(&self) -> String {
        let code = self.device_status();
        if !self.loaded {
            return undefined_status(code);
        }
        match code {
            0 => self.host.request_localized_string(strings::STATUS_SUCCESS),
            1 => self
                .host
                .request_localized_string(strings::STATUS_NOT_AVAILABLE),
            _ => undefined_status(code),
        }
    }

    /// Serial number of the open sensor.
    pub fn serial_number(&self) -> Option<String> {
        self.lifecycle.serial_number()
    }

    /// Joints in schema order.
    pub fn tracked_joints(&self) -> &[TrackedJoint] {
        self.joints.joints()
    }

    pub fn joint_store(&self) -> &TrackedJointStore {
        &self.joints
    }

    pub fn capabilities(&self) -> AdapterCapabilities {
        CAPABILITIES
    }

    /// Troubleshooting page in the host's documentation language.
    pub fn error_docs_uri(&self) -> String {
        let language = self.host.docs_language_code().unwrap_or("en");
        format!("{ERROR_DOCS_BASE}/{language}/one/troubleshooting/")
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn stats(&self) -> PumpStatsSnapshot {
        self.stats.stats()
    }

    pub fn stats_summary(&self) -> String {
        self.stats.summary()
    }

    /// Setting choices for a settings panel, labelled by the host.
    pub fn settings_options(&self) -> [SettingChoice; 2] {
        settings::settings_options(&self.host)
    }

    /// Store a new processing mode; it applies on the next `initialize`.
    pub fn set_tracking_mode(&mut self, mode: ProcessingMode) {
        self.host
            .settings_mut()
            .set_setting(TRACKING_SETTING, mode as i32);
    }

    /// Store a new sensor orientation; it applies on the next `initialize`.
    pub fn set_sensor_orientation(&mut self, orientation: SensorOrientation) {
        self.host
            .settings_mut()
            .set_setting(ORIENTATION_SETTING, orientation as i32);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Shut down and give the host back.
    pub fn into_host(mut self) -> H {
        self.shutdown();
        self.host
    }
}

#[cfg(all(test, feature = "simulator"))]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, SettingsStore};
    use crate::sensor::{NoopBackend, SimulatedBackend, SimulatedScene, Stage};

    fn loaded<B: SensorBackend>(backend: B) -> TrackingAdapter<B, MemoryHost> {
        let mut adapter = TrackingAdapter::new(backend, MemoryHost::new());
        adapter.on_load();
        adapter
    }

    #[test]
    fn test_status_string_before_load_is_undefined() {
        let adapter = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new());
        assert!(adapter.device_status_string().starts_with("Undefined: 1"));
    }

    #[test]
    fn test_initialize_logs_status() {
        let mut adapter = loaded(SimulatedBackend::new(SimulatedScene::Standing));
        assert!(adapter.initialize().is_ok());
        assert!(adapter.is_initialized());

        let logs = adapter.host().logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].0, LogSeverity::Info);
        assert!(logs[0].1.contains("Code 0"));
    }

    #[test]
    fn test_failed_initialize_logs_reason() {
        let mut adapter = loaded(NoopBackend::new());
        assert!(adapter.initialize().is_err());

        let errors = adapter.host().logs_at_least(LogSeverity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("No sensor device at index 0"));
    }

    #[test]
    fn test_update_failure_is_logged_and_swallowed() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = loaded(backend);
        adapter.initialize().unwrap();

        probe.fail(Stage::PopResult);
        let outcome = adapter.update();
        assert!(matches!(
            outcome,
            TickOutcome::Failed(AdapterError::FrameAcquisition(_))
        ));
        assert_eq!(adapter.stats().failures, 1);
        assert_eq!(adapter.host().logs_at_least(LogSeverity::Error).len(), 1);

        probe.recover(Stage::PopResult);
        assert!(adapter.update().updated_joints());
    }

    #[test]
    fn test_settings_write_back() {
        let mut adapter = loaded(NoopBackend::new());
        adapter.set_tracking_mode(ProcessingMode::Cuda);
        adapter.set_sensor_orientation(SensorOrientation::Clockwise90);

        let settings = adapter.host().settings();
        assert_eq!(settings.get_setting(TRACKING_SETTING, 4), 2);
        assert_eq!(settings.get_setting(ORIENTATION_SETTING, 0), 1);
    }

    #[test]
    fn test_error_docs_uri_language() {
        let adapter = loaded(NoopBackend::new());
        assert_eq!(
            adapter.error_docs_uri(),
            "https://docs.k2vr.tech/en/one/troubleshooting/"
        );

        let adapter = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new().with_language("pl"));
        assert!(adapter.error_docs_uri().contains("/pl/"));
    }

    #[test]
    fn test_capabilities() {
        let adapter = loaded(NoopBackend::new());
        let caps = adapter.capabilities();
        assert!(!caps.position_filter_blocking);
        assert!(!caps.physics_override);
        assert!(!caps.self_update);
        assert!(caps.flip_supported);
        assert!(caps.app_orientation_supported);
    }
}
