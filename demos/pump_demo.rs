//! Demonstration of the depth body adapter frame pump.
//!
//! This example shows how to:
//! 1. Create an adapter over the simulated sensor
//! 2. Initialize the device and tracker
//! 3. Pump frames and read the generic joints back
//! 4. Watch the skeleton get lost and reacquired
//!
//! Run with: cargo run --example pump_demo

use std::time::Duration;

use depth_body_adapter::{
    host::MemoryHost,
    joints::TrackedJointType,
    sensor::{SimulatedBackend, SimulatedScene},
    TickOutcome, TrackingAdapter,
};

fn main() {
    println!("Depth Body Adapter - Pump Demo");
    println!("==============================");
    println!();

    // Results lag two captures behind, like a real inference engine
    let backend = SimulatedBackend::new(SimulatedScene::Walking).with_latency(2);
    let probe = backend.probe();

    let mut adapter = TrackingAdapter::new(backend, MemoryHost::new());
    adapter.on_load();

    if let Err(e) = adapter.initialize() {
        eprintln!("Error initializing sensor: {e}");
        return;
    }
    println!("{}", adapter.device_status_string());
    println!();

    for tick in 1..=90 {
        // Person leaves the scene for a second, then comes back
        match tick {
            40 => probe.set_scene(SimulatedScene::Empty),
            70 => probe.set_scene(SimulatedScene::Walking),
            _ => {}
        }

        let outcome = adapter.update();
        match outcome {
            TickOutcome::Tracked { .. } if tick % 10 == 0 => {
                if let Some(head) = adapter.joint_store().get(TrackedJointType::JointHead) {
                    println!(
                        "  tick {tick:>3}: head at ({:>6.1}, {:>6.1}, {:>6.1}) {:?}",
                        head.position.x, head.position.y, head.position.z, head.tracking_state
                    );
                }
            }
            TickOutcome::Pending => println!("  tick {tick:>3}: waiting for tracker"),
            TickOutcome::NoBodies if tick % 10 == 0 => {
                println!("  tick {tick:>3}: nobody in view, joints hold last pose")
            }
            TickOutcome::Failed(e) => println!("  tick {tick:>3}: failed: {e}"),
            _ => {}
        }

        std::thread::sleep(Duration::from_millis(33));
    }

    println!();
    println!("{}", adapter.stats_summary());

    adapter.shutdown();
    println!();
    println!("Open devices after shutdown: {}", probe.open_devices());
}
