//! # FRI Control Node Binary
//!
//! Drives a robot controller over FRI: activates the session, then runs the
//! read → update → write loop until interrupted.
//!
//! # Usage
//!
//! ```bash
//! # Run against the simulated controller
//! fri_control_node --config config/control_node.toml --simulate
//!
//! # Select a registered transport explicitly
//! fri_control_node --config config/control_node.toml --driver simulation
//!
//! # Verbose logging, JSON output
//! fri_control_node -c config/control_node.toml -v --json
//! ```

use clap::Parser;
use fri_common::config::{ConfigLoader, LogLevel};
use fri_common::consts::DEFAULT_CONFIG_PATH;
use fri_hardware::config::NodeConfig;
use fri_hardware::driver_registry::DriverRegistry;
use fri_hardware::drivers::simulation;
use fri_hardware::node::ControlNode;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// FRI control node - cyclic robot control over the Fast Robot Interface
#[derive(Parser, Debug)]
#[command(name = "fri_control_node")]
#[command(version)]
#[command(about = "FRI robot control client driven by a periodic control loop")]
#[command(long_about = None)]
struct Args {
    /// Path to the node configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Force the simulation transport (overrides --driver and the config)
    #[arg(short = 's', long)]
    simulate: bool,

    /// Session transport to use instead of the configured one
    #[arg(short, long)]
    driver: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("Control node failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = NodeConfig::load(&args.config);
    let configured_level = loaded
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, configured_level);

    info!("FRI control node v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Loading configuration from {:?}", args.config);
    let mut config = loaded?;

    if args.simulate {
        info!("Simulation mode enabled");
        config.driver = simulation::DRIVER_NAME.to_string();
    } else if let Some(driver) = &args.driver {
        info!("Driver from CLI: {}", driver);
        config.driver = driver.clone();
    }

    let registry = DriverRegistry::with_builtin_drivers();
    let mut node = ControlNode::from_registry(config, &registry)?;

    let running = node.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    node.init()?;
    node.activate_with_retry()?;

    if let Err(e) = node.run() {
        error!("Control loop error: {}", e);
    }

    node.shutdown()?;
    info!("FRI control node shutdown complete");
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and the configured level.
///
/// `RUST_LOG`, when set, overrides both.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose && configured != LogLevel::Trace {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
