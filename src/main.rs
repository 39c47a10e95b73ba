//! Depth Body Adapter CLI
//!
//! Drives the tracking adapter the way a host application would.

use clap::{Parser, Subcommand};
use depth_body_adapter::{
    config::Config,
    core::{TickOutcome, TrackingAdapter, CAPABILITIES},
    host::ConsoleHost,
    joints::{TrackedJointType, JOINT_MAPPING},
    sensor::{NoopBackend, ProcessingMode, SensorBackend, SensorOrientation},
    PumpStatsSnapshot, VERSION,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "simulator")]
use depth_body_adapter::sensor::{SimulatedBackend, SimulatedScene};

#[derive(Parser)]
#[command(name = "depth-body")]
#[command(version = VERSION)]
#[command(about = "Depth camera body tracking adapter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the sensor and pump frames until Ctrl+C
    Run {
        /// Use the built-in simulated sensor
        #[arg(long)]
        simulate: bool,

        /// Simulated scene (standing, walking or empty)
        #[arg(long, default_value = "walking")]
        scene: String,

        /// Simulated tracker latency in frames
        #[arg(long, default_value = "1")]
        latency: usize,

        /// Stop after this many update ticks
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Try to initialize the sensor and report its status
    Status {
        /// Use the built-in simulated sensor
        #[arg(long)]
        simulate: bool,
    },

    /// Show the sensor to generic joint mapping
    Joints,

    /// Show adapter capabilities
    Capabilities,

    /// Show configuration
    Config,

    /// Change a setting (tracking or orientation)
    Set {
        /// Setting name
        key: String,

        /// New value
        value: i32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            simulate,
            scene,
            latency,
            ticks,
        } => {
            cmd_run(simulate, &scene, latency, ticks);
        }
        Commands::Status { simulate } => {
            cmd_status(simulate);
        }
        Commands::Joints => {
            cmd_joints();
        }
        Commands::Capabilities => {
            cmd_capabilities();
        }
        Commands::Config => {
            cmd_config();
        }
        Commands::Set { key, value } => {
            cmd_set(&key, value);
        }
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config, using defaults: {e}");
            Config::default()
        }
    }
}

#[cfg(feature = "simulator")]
fn cmd_run(simulate: bool, scene: &str, latency: usize, ticks: Option<u64>) {
    if simulate {
        let scene = match scene {
            "standing" => SimulatedScene::Standing,
            "walking" => SimulatedScene::Walking,
            "empty" => SimulatedScene::Empty,
            other => {
                eprintln!("Error: Unknown scene '{other}' (expected standing, walking or empty)");
                std::process::exit(1);
            }
        };
        run_adapter(SimulatedBackend::new(scene).with_latency(latency), ticks);
    } else {
        run_adapter(NoopBackend::new(), ticks);
    }
}

#[cfg(not(feature = "simulator"))]
fn cmd_run(simulate: bool, _scene: &str, _latency: usize, ticks: Option<u64>) {
    if simulate {
        eprintln!("Warning: --simulate ignored (simulator feature not enabled at compile time)");
    }
    run_adapter(NoopBackend::new(), ticks);
}

fn run_adapter<B: SensorBackend>(backend: B, ticks: Option<u64>) {
    println!("Depth Body Adapter v{VERSION}");
    println!();

    let config = load_config();
    let tick_interval = config.tick_interval;
    let stats_path = config.data_path.join("pump_stats.json");
    let mut adapter = TrackingAdapter::new(backend, ConsoleHost::new(config));
    adapter.on_load();

    if adapter.initialize().is_err() {
        eprintln!("{}", adapter.device_status_string());
        eprintln!();
        eprintln!("Troubleshooting: {}", adapter.error_docs_uri());
        std::process::exit(1);
    }

    println!("Instance ID: {}", adapter.instance_id());
    if let Some(serial) = adapter.serial_number() {
        println!("Sensor: {serial}");
    }
    println!("Tick interval: {}ms", tick_interval.as_millis());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(running.clone());

    let mut tick: u64 = 0;
    let mut was_tracked = false;
    while running.load(Ordering::SeqCst) && ticks.map_or(true, |limit| tick < limit) {
        let outcome = adapter.update();
        tick += 1;

        let tracked = adapter.is_skeleton_tracked();
        if tracked != was_tracked {
            println!(
                "[tick {tick}] Skeleton {}",
                if tracked { "acquired" } else { "lost" }
            );
            was_tracked = tracked;
        }

        if matches!(outcome, TickOutcome::Tracked { .. }) && tick % 30 == 0 {
            if let Some(head) = adapter.joint_store().get(TrackedJointType::JointHead) {
                println!(
                    "[tick {tick}] Head: ({:.0}, {:.0}, {:.0}) mm, {:?}",
                    head.position.x, head.position.y, head.position.z, head.tracking_state
                );
            }
        }

        thread::sleep(tick_interval);
    }

    println!();
    println!("Stopping...");
    println!();
    println!("{}", adapter.stats_summary());
    save_stats(&stats_path, &adapter.stats());
    adapter.shutdown();
}

fn save_stats(path: &Path, stats: &PumpStatsSnapshot) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create {parent:?}: {e}");
            return;
        }
    }
    match serde_json::to_string_pretty(stats) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                eprintln!("Warning: Could not save statistics to {path:?}: {e}");
            }
        }
        Err(e) => eprintln!("Warning: Could not serialize statistics: {e}"),
    }
}

fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}

#[cfg(feature = "simulator")]
fn cmd_status(simulate: bool) {
    if simulate {
        report_status(SimulatedBackend::new(SimulatedScene::Empty));
    } else {
        report_status(NoopBackend::new());
    }
}

#[cfg(not(feature = "simulator"))]
fn cmd_status(simulate: bool) {
    if simulate {
        eprintln!("Warning: --simulate ignored (simulator feature not enabled at compile time)");
    }
    report_status(NoopBackend::new());
}

fn report_status<B: SensorBackend>(backend: B) {
    let devices = backend.device_count();
    let mut adapter = TrackingAdapter::new(backend, ConsoleHost::new(load_config()));
    adapter.on_load();
    let result = adapter.initialize();

    println!("Depth Body Adapter Status");
    println!("=========================");
    println!();
    println!("Attached devices: {devices}");
    println!("Device status: {}", adapter.device_status());
    println!("Initialized: {}", adapter.is_initialized());
    if let Some(serial) = adapter.serial_number() {
        println!("Sensor: {serial}");
    }
    println!();
    println!("{}", adapter.device_status_string());
    if result.is_err() {
        println!();
        println!("Troubleshooting: {}", adapter.error_docs_uri());
    }

    adapter.shutdown();
}

fn cmd_joints() {
    println!("Joint Mapping");
    println!("=============");
    println!();
    for (role, sensor_joint) in JOINT_MAPPING {
        println!("  {:<20} <- {:?}", role.name(), sensor_joint);
    }
}

fn cmd_capabilities() {
    println!(
        "{}",
        serde_json::to_string_pretty(&CAPABILITIES).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_config() {
    let config = load_config();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_set(key: &str, value: i32) {
    let mut adapter = TrackingAdapter::new(NoopBackend::new(), ConsoleHost::new(load_config()));

    match key.to_lowercase().as_str() {
        "tracking" => match ProcessingMode::try_from(value) {
            Ok(mode) => adapter.set_tracking_mode(mode),
            Err(v) => {
                eprintln!("Error: Unsupported tracking mode {v} (expected 0-4)");
                std::process::exit(1);
            }
        },
        "orientation" => match SensorOrientation::try_from(value) {
            Ok(orientation) => adapter.set_sensor_orientation(orientation),
            Err(v) => {
                eprintln!("Error: Unsupported orientation {v} (expected 0-3)");
                std::process::exit(1);
            }
        },
        other => {
            eprintln!("Error: Unknown setting '{other}' (expected tracking or orientation)");
            std::process::exit(1);
        }
    }

    let [tracking, orientation] = adapter.settings_options();
    for choice in [tracking, orientation] {
        let label = choice
            .options
            .iter()
            .find(|o| o.value == choice.selected)
            .map(|o| o.label.as_str())
            .unwrap_or("?");
        println!("{} {} ({})", choice.label, choice.selected, label);
    }

    let config = adapter.into_host().into_config();
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
}
