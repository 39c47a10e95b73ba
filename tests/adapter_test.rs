//! Integration tests for the host-facing tracking adapter

#[cfg(feature = "simulator")]
mod adapter_tests {
    use depth_body_adapter::host::{MemoryHost, ORIENTATION_SETTING, TRACKING_SETTING};
    use depth_body_adapter::joints::{TrackedJointState, TrackedJointType};
    use depth_body_adapter::sensor::simulated::standing_pose;
    use depth_body_adapter::sensor::{
        JointConfidenceLevel, NoopBackend, SensorJoint, SensorJointId, SensorOrientation,
        SimulatedBackend, SimulatedScene, Skeleton, Stage,
    };
    use depth_body_adapter::{
        AdapterError, Host, LifecycleState, LogSeverity, Quaternion, SettingsStore, TickOutcome,
        TrackingAdapter, Vector3, JOINT_MAPPING,
    };

    fn adapter_with(backend: SimulatedBackend) -> TrackingAdapter<SimulatedBackend, MemoryHost> {
        let mut adapter = TrackingAdapter::new(backend, MemoryHost::new());
        adapter.on_load();
        adapter
    }

    #[test]
    fn test_store_matches_schema_after_construction() {
        let adapter = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new());
        let roles: Vec<_> = adapter.tracked_joints().iter().map(|j| j.role()).collect();
        let expected: Vec<_> = TrackedJointType::sensor_roles().collect();
        assert_eq!(roles, expected);
        assert!(!adapter.is_initialized());
        assert!(!adapter.is_skeleton_tracked());
    }

    #[test]
    fn test_initialize_without_device() {
        let mut adapter = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new());
        adapter.on_load();

        let result = adapter.initialize();
        assert!(matches!(result, Err(AdapterError::DeviceOpen(_))));
        assert!(!adapter.is_initialized());
        assert_eq!(adapter.device_status(), 1);
        assert!(adapter
            .device_status_string()
            .starts_with("Not available! (Code 1)"));
        assert_eq!(adapter.state(), LifecycleState::Failed);
    }

    #[test]
    fn test_not_available_string_comes_from_host() {
        let host = MemoryHost::new().with_string("/Statuses/NotAvailable", "Brak czujnika");
        let mut adapter = TrackingAdapter::new(NoopBackend::new(), host);
        adapter.on_load();
        let _ = adapter.initialize();
        assert_eq!(adapter.device_status_string(), "Brak czujnika");
    }

    #[test]
    fn test_shutdown_before_initialize_and_repeated() {
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Standing));
        adapter.shutdown();
        adapter.shutdown();
        assert!(!adapter.is_initialized());
        assert!(adapter.host().logs_at_least(LogSeverity::Warning).is_empty());

        adapter.initialize().unwrap();
        adapter.shutdown();
        adapter.shutdown();
        assert!(!adapter.is_initialized());
        assert_eq!(adapter.device_status(), 1);
    }

    #[test]
    fn test_update_without_device_is_noop() {
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Standing));
        assert_eq!(adapter.update(), TickOutcome::Idle);

        let mut failed = TrackingAdapter::new(NoopBackend::new(), MemoryHost::new());
        let _ = failed.initialize();
        assert_eq!(failed.update(), TickOutcome::Idle);
        assert!(failed
            .tracked_joints()
            .iter()
            .all(|j| j.tracking_state == TrackedJointState::StateNotTracked));
    }

    #[test]
    fn test_zero_bodies_keeps_previous_joints() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();

        assert!(adapter.update().updated_joints());
        assert!(adapter.is_skeleton_tracked());
        let before = adapter.tracked_joints().to_vec();

        probe.set_scene(SimulatedScene::Empty);
        assert_eq!(adapter.update(), TickOutcome::NoBodies);
        assert!(!adapter.is_skeleton_tracked());
        assert_eq!(adapter.tracked_joints(), before.as_slice());
    }

    #[test]
    fn test_one_body_overwrites_every_mapped_joint() {
        let skeleton = Skeleton::from_fn(|id| SensorJoint {
            position: Vector3::new(id.index() as f32 * 10.0, -5.0, 1800.0),
            orientation: Quaternion::from_yaw(0.3),
            confidence: JointConfidenceLevel::Low,
        });
        let backend = SimulatedBackend::new(SimulatedScene::Script(vec![vec![skeleton.clone()]]));
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();

        assert_eq!(adapter.update(), TickOutcome::Tracked { bodies: 1 });
        assert!(adapter.is_skeleton_tracked());
        for (role, sensor_joint) in JOINT_MAPPING {
            let joint = adapter.joint_store().get(role).unwrap();
            let source = skeleton.joint(sensor_joint);
            assert_eq!(joint.position, source.position, "{role}");
            assert_eq!(joint.orientation, source.orientation, "{role}");
            assert_eq!(joint.tracking_state, TrackedJointState::StateInferred, "{role}");
        }
    }

    #[test]
    fn test_head_follows_sensor_over_three_updates() {
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Standing));
        adapter.initialize().unwrap();
        assert!(adapter.is_initialized());
        assert_eq!(adapter.device_status(), 0);
        assert!(adapter.device_status_string().starts_with("Success! (Code 0)"));

        let expected = standing_pose(Vector3::ZERO, 0.0);
        let sensor_head = expected.joint(SensorJointId::Head);
        assert_eq!(sensor_head.confidence, JointConfidenceLevel::High);

        for _ in 0..3 {
            assert!(adapter.update().updated_joints());
            let head = adapter.joint_store().get(TrackedJointType::JointHead).unwrap();
            assert_eq!(head.position, sensor_head.position);
            assert_eq!(head.tracking_state, TrackedJointState::StateTracked);
        }
        assert_eq!(adapter.stats().tracked_frames, 3);
    }

    #[test]
    fn test_latency_means_first_tick_is_pending() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing).with_latency(1);
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();

        assert_eq!(adapter.update(), TickOutcome::Pending);
        assert!(!adapter.is_skeleton_tracked());
        assert!(adapter.update().updated_joints());

        let stats = adapter.stats();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.captures_enqueued, 2);
        assert_eq!(stats.results_pending, 1);
    }

    #[test]
    fn test_capture_failure_skips_tick_and_recovers() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();
        adapter.update();

        probe.fail(Stage::Capture);
        for _ in 0..5 {
            assert!(matches!(
                adapter.update(),
                TickOutcome::Failed(AdapterError::FrameAcquisition(_))
            ));
        }
        assert!(adapter.is_skeleton_tracked());
        assert_eq!(adapter.host().logs_at_least(LogSeverity::Error).len(), 5);

        probe.recover(Stage::Capture);
        assert!(adapter.update().updated_joints());
        assert_eq!(probe.open_devices(), 1);
    }

    #[test]
    fn test_tracker_failure_releases_everything() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing).failing_at(Stage::CreateTracker);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);

        assert!(matches!(
            adapter.initialize(),
            Err(AdapterError::TrackerCreate(_))
        ));
        assert!(!adapter.is_initialized());
        assert_eq!(adapter.device_status(), 1);
        assert!(!probe.cameras_running());
        assert_eq!(probe.open_devices(), 0);
    }

    #[test]
    fn test_invalid_setting_fails_before_opening() {
        let host = MemoryHost::new().with_setting(TRACKING_SETTING, 12);
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = TrackingAdapter::new(backend, host);

        assert!(matches!(
            adapter.initialize(),
            Err(AdapterError::TrackerCreate(_))
        ));
        assert_eq!(probe.captures_taken(), 0);
        assert_eq!(probe.open_devices(), 0);
    }

    #[test]
    fn test_retry_after_failure() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing).failing_at(Stage::Open);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);

        assert!(adapter.initialize().is_err());
        probe.recover(Stage::Open);
        assert!(adapter.initialize().is_ok());
        assert!(adapter.is_initialized());
        assert_eq!(adapter.state(), LifecycleState::Streaming);
    }

    #[test]
    fn test_reinitialize_after_shutdown_uses_new_settings() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();
        adapter.shutdown();
        assert_eq!(adapter.state(), LifecycleState::ShutDown);

        adapter.set_sensor_orientation(SensorOrientation::Flip180);
        adapter.initialize().unwrap();
        assert_eq!(
            adapter.host().settings().get_setting(ORIENTATION_SETTING, 0),
            3
        );
        assert_eq!(probe.open_devices(), 1);
        assert_eq!(probe.live_trackers(), 1);
    }

    #[test]
    fn test_shutdown_failure_is_logged_not_raised() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();
        adapter.host().clear_logs();

        probe.fail(Stage::StopCameras);
        adapter.shutdown();
        assert!(!adapter.is_initialized());
        assert_eq!(adapter.host().logs_at_least(LogSeverity::Error).len(), 1);
        assert_eq!(probe.open_devices(), 0);
    }

    #[test]
    fn test_signal_joint_is_accepted() {
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Standing));
        adapter.initialize().unwrap();
        adapter.signal_joint(0);
        adapter.signal_joint(usize::MAX);
        assert!(adapter.host().logs_at_least(LogSeverity::Warning).is_empty());
    }

    #[test]
    fn test_walking_scene_moves_head() {
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Walking));
        adapter.initialize().unwrap();

        adapter.update();
        let first = adapter.joint_store().get(TrackedJointType::JointHead).unwrap().position;
        for _ in 0..5 {
            adapter.update();
        }
        let later = adapter.joint_store().get(TrackedJointType::JointHead).unwrap().position;
        assert!(first.distance(later) > 1.0);
    }

    #[test]
    fn test_tracking_resumes_after_result_queue_fills() {
        let backend = SimulatedBackend::new(SimulatedScene::Standing);
        let probe = backend.probe();
        let mut adapter = adapter_with(backend);
        adapter.initialize().unwrap();

        probe.fail(Stage::PopResult);
        for _ in 0..5 {
            assert!(matches!(
                adapter.update(),
                TickOutcome::Failed(AdapterError::FrameAcquisition(_))
            ));
        }
        probe.recover(Stage::PopResult);
        adapter.host().clear_logs();

        for _ in 0..20 {
            assert_eq!(adapter.update(), TickOutcome::Tracked { bodies: 1 });
        }
        assert!(adapter.is_skeleton_tracked());
        assert!(adapter.stats().captures_dropped >= 1);
        assert!(adapter.host().logs_at_least(LogSeverity::Error).is_empty());
        assert_eq!(adapter.host().logs_at_least(LogSeverity::Warning).len(), 1);
    }

    #[test]
    fn test_script_scene_starts_at_first_frame() {
        let script = vec![vec![standing_pose(Vector3::ZERO, 0.0)], Vec::new()];
        let mut adapter = adapter_with(SimulatedBackend::new(SimulatedScene::Script(script)));
        adapter.initialize().unwrap();

        assert_eq!(adapter.update(), TickOutcome::Tracked { bodies: 1 });
        assert_eq!(adapter.update(), TickOutcome::NoBodies);
        assert_eq!(adapter.update(), TickOutcome::Tracked { bodies: 1 });
    }
}
