//! Control node: drives a hardware interface and a controller at a fixed
//! period.
//!
//! Each cycle is `read()` → `controller.update()` → `write()`. A cycle that
//! finds the interface inactive backs off for `NOT_ACTIVE_BACKOFF_MS`
//! instead of the remaining cycle time; a failed read skips the update and
//! the write for that cycle.

use crate::client::RobotControlClient;
use crate::config::NodeConfig;
use crate::controller::{Controller, JointHoldController};
use crate::driver_registry::DriverRegistry;
use fri_common::config::ConfigError;
use fri_common::consts::NOT_ACTIVE_BACKOFF_MS;
use fri_common::hardware::interface::{HardwareError, LifecycleState, SystemInterface};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that stop the control node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Node configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Hardware interface operation failed.
    #[error(transparent)]
    Hardware(#[from] HardwareError),
}

/// Result of a single control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// State read, controller updated, command written.
    Completed,
    /// Interface not active; nothing exchanged.
    NotActive,
    /// Reading state failed; update and write skipped.
    ReadFault,
    /// Writing the command failed.
    WriteFault,
}

/// Timing and fault counters of the control loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Cycles executed, whatever their outcome.
    pub cycle_count: u64,
    /// Cycles that exceeded the configured period.
    pub timing_violations: u64,
    /// Longest cycle in microseconds.
    pub max_cycle_time_us: u64,
    /// Sum of all cycle times in microseconds.
    pub total_cycle_time_us: u64,
    /// Cycles ending in `ReadFault`.
    pub read_faults: u64,
    /// Cycles ending in `WriteFault`.
    pub write_faults: u64,
    /// Cycles ending in `NotActive`.
    pub not_active_cycles: u64,
}

impl CycleStats {
    /// Mean cycle time in microseconds.
    pub fn average_cycle_time_us(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.total_cycle_time_us / self.cycle_count
        }
    }

    fn record(&mut self, outcome: CycleOutcome) {
        match outcome {
            CycleOutcome::Completed => {}
            CycleOutcome::NotActive => self.not_active_cycles += 1,
            CycleOutcome::ReadFault => self.read_faults += 1,
            CycleOutcome::WriteFault => self.write_faults += 1,
        }
    }
}

/// Periodic read → update → write loop over one hardware interface.
pub struct ControlNode {
    config: NodeConfig,
    hardware: Box<dyn SystemInterface>,
    controller: Box<dyn Controller>,
    running: Arc<AtomicBool>,
    cycle_time: Duration,
    last_cycle: Option<Instant>,
    stats: CycleStats,
}

impl ControlNode {
    /// Create a node over an existing interface and controller.
    ///
    /// # Errors
    /// Returns error if configuration validation fails.
    pub fn new(
        config: NodeConfig,
        hardware: Box<dyn SystemInterface>,
        controller: Box<dyn Controller>,
    ) -> Result<Self, NodeError> {
        config.validate()?;
        let cycle_time = config.cycle_time();

        info!(
            "ControlNode '{}' created with {}, cycle_time={}us",
            config.shared.service_name,
            hardware.name(),
            config.cycle_time_us
        );

        Ok(Self {
            config,
            hardware,
            controller,
            running: Arc::new(AtomicBool::new(false)),
            cycle_time,
            last_cycle: None,
            stats: CycleStats::default(),
        })
    }

    /// Create a node with a `RobotControlClient` over the configured
    /// transport and a `JointHoldController`.
    ///
    /// # Errors
    /// `NodeError::Hardware` with `DriverNotFound` if `config.driver` is not registered.
    pub fn from_registry(config: NodeConfig, registry: &DriverRegistry) -> Result<Self, NodeError> {
        config.validate()?;
        let session = registry.create_session(&config.driver)?;
        info!("Created '{}' session", session.name());

        let client = RobotControlClient::new(session, config.client.clone())?;
        Self::new(
            config,
            Box::new(client),
            Box::new(JointHoldController::new()),
        )
    }

    /// Initialize the interface from the configured topology and bind the
    /// controller to it.
    pub fn init(&mut self) -> Result<(), NodeError> {
        let info = self.config.hardware_info();
        info!(
            "Initializing '{}' with {} joints",
            info.name,
            info.joints.len()
        );
        self.hardware.initialize(&info)?;
        self.controller.configure(self.hardware.as_ref())?;
        Ok(())
    }

    /// Activate the interface, retrying connection failures per
    /// `[activation]`.
    pub fn activate_with_retry(&mut self) -> Result<(), NodeError> {
        let policy = self.config.activation.clone();

        let mut attempt = 1;
        loop {
            match self.hardware.activate() {
                Ok(()) => {
                    self.controller.on_activate();
                    self.last_cycle = None;
                    info!("Hardware active after {} attempt(s)", attempt);
                    return Ok(());
                }
                Err(HardwareError::ConnectionError(reason)) if attempt < policy.max_attempts => {
                    warn!(
                        "Activation attempt {}/{} failed: {}",
                        attempt, policy.max_attempts, reason
                    );
                    std::thread::sleep(policy.retry_interval());
                    attempt += 1;
                }
                Err(e) => {
                    error!("Activation failed after {} attempt(s): {}", attempt, e);
                    return Err(e.into());
                }
            }
        }
    }

    /// Execute one read → update → write cycle.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let now = Instant::now();
        let period = self
            .last_cycle
            .map_or(self.cycle_time, |last| now.duration_since(last));
        self.last_cycle = Some(now);

        let outcome = self.exchange(period);
        self.stats.cycle_count += 1;
        self.stats.record(outcome);
        outcome
    }

    fn exchange(&mut self, period: Duration) -> CycleOutcome {
        match self.hardware.read() {
            Ok(()) => {}
            Err(HardwareError::NotActive) => return CycleOutcome::NotActive,
            Err(e) => {
                debug!("Cycle skipped: {}", e);
                return CycleOutcome::ReadFault;
            }
        }

        if let Err(e) = self.controller.update(self.hardware.as_mut(), period) {
            warn!("Controller '{}' update failed: {}", self.controller.name(), e);
        }

        match self.hardware.write() {
            Ok(()) => CycleOutcome::Completed,
            Err(HardwareError::NotActive) => CycleOutcome::NotActive,
            Err(_) => CycleOutcome::WriteFault,
        }
    }

    /// Run the control loop until the running flag is cleared.
    pub fn run(&mut self) -> Result<(), NodeError> {
        info!(
            "Starting control loop (cycle_time={}us)...",
            self.cycle_time.as_micros()
        );
        self.running.store(true, Ordering::SeqCst);

        if detect_rt_mode() {
            info!("Running in real-time mode");
        } else {
            info!("Running in standard (non-RT) mode");
        }

        let backoff = Duration::from_millis(NOT_ACTIVE_BACKOFF_MS);

        while self.running.load(Ordering::SeqCst) {
            let cycle_start = Instant::now();
            let outcome = self.run_cycle();

            let cycle_time_us = cycle_start.elapsed().as_micros() as u64;
            self.stats.total_cycle_time_us += cycle_time_us;
            self.stats.max_cycle_time_us = self.stats.max_cycle_time_us.max(cycle_time_us);

            if cycle_time_us > u64::from(self.config.cycle_time_us) {
                self.stats.timing_violations += 1;
                if self.stats.timing_violations <= 10 || self.stats.timing_violations % 1000 == 0 {
                    warn!(
                        "Timing violation #{}: cycle took {}us (target {}us)",
                        self.stats.timing_violations, cycle_time_us, self.config.cycle_time_us
                    );
                }
            }

            if outcome == CycleOutcome::NotActive {
                std::thread::sleep(backoff);
            } else {
                let elapsed = cycle_start.elapsed();
                if elapsed < self.cycle_time {
                    std::thread::sleep(self.cycle_time - elapsed);
                }
            }

            if self.stats.cycle_count % 1000 == 0 {
                debug!(
                    "Control loop: {} cycles, avg={}us, max={}us, violations={}, read_faults={}",
                    self.stats.cycle_count,
                    self.stats.average_cycle_time_us(),
                    self.stats.max_cycle_time_us,
                    self.stats.timing_violations,
                    self.stats.read_faults
                );
            }
        }

        info!(
            "Control loop stopped after {} cycles (violations: {}, faults: {} read, {} write)",
            self.stats.cycle_count,
            self.stats.timing_violations,
            self.stats.read_faults,
            self.stats.write_faults
        );
        Ok(())
    }

    /// Stop the loop, deactivate and finalize the interface.
    pub fn shutdown(&mut self) -> Result<(), NodeError> {
        info!("Shutdown requested");
        self.running.store(false, Ordering::SeqCst);

        if self.hardware.lifecycle_state() == LifecycleState::Active {
            self.hardware.deactivate()?;
        }
        self.hardware.finalize()?;
        Ok(())
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Timing and fault counters.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// The driven hardware interface.
    pub fn hardware(&self) -> &dyn SystemInterface {
        self.hardware.as_ref()
    }

    /// Node configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

/// Detect if running in real-time mode by checking scheduler policy.
fn detect_rt_mode() -> bool {
    #[cfg(target_os = "linux")]
    {
        use libc::{SCHED_FIFO, SCHED_RR, sched_getscheduler};
        // SAFETY: queries the calling thread's policy, no pointers involved.
        let policy = unsafe { sched_getscheduler(0) };
        policy == SCHED_FIFO || policy == SCHED_RR
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}
