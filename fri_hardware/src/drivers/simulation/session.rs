//! Simulated FRI session.
//!
//! The `SimulatedSession` plays the controller side of the exchange:
//!
//! - Phase progression: `connect` → MonitoringWait, first frame read →
//!   MonitoringReady, first command written → CommandingWait, second command
//!   written → CommandingActive.
//! - Joints follow the commanded position with a first-order lag; the
//!   interpolated position is the last commanded position.
//! - Measured torque echoes the commanded torque.
//!
//! Fault injection makes the next N reads or writes fail.

use fri_common::consts::NUMBER_OF_JOINTS;
use fri_common::fri::session::{FriSession, SessionError};
use fri_common::fri::types::{RobotCommand, RobotState, SessionState};
use tracing::{debug, trace};

/// Fraction of the remaining position error closed per frame.
const TRACKING_GAIN: f64 = 0.5;

/// Simulated controller-side FRI session.
#[derive(Debug, Clone)]
pub struct SimulatedSession {
    state: RobotState,
    /// Last command received, if any since connect.
    last_command: Option<RobotCommand>,
    connected: bool,
    refuse_connect: bool,
    pending_read_faults: u32,
    pending_write_faults: u32,
    frames_sent: u64,
    frames_received: u64,
}

impl SimulatedSession {
    /// Session with all joints at zero.
    pub fn new() -> Self {
        Self {
            state: RobotState::default(),
            last_command: None,
            connected: false,
            refuse_connect: false,
            pending_read_faults: 0,
            pending_write_faults: 0,
            frames_sent: 0,
            frames_received: 0,
        }
    }

    /// Start with the leading joints at `position`.
    pub fn with_initial_position(mut self, position: &[f64]) -> Self {
        let n = position.len().min(NUMBER_OF_JOINTS);
        self.state.measured_joint_position[..n].copy_from_slice(&position[..n]);
        self.state.ipo_joint_position = self.state.measured_joint_position;
        self
    }

    /// Make every `connect` fail.
    pub fn failing_connect(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    /// Fail the next `count` frame reads.
    pub fn inject_read_faults(&mut self, count: u32) {
        self.pending_read_faults = count;
    }

    /// Fail the next `count` frame writes.
    pub fn inject_write_faults(&mut self, count: u32) {
        self.pending_write_faults = count;
    }

    /// Frames handed out by `read_frame`.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Commands accepted by `write_frame`.
    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    /// Last command accepted since connect.
    pub fn last_command(&self) -> Option<&RobotCommand> {
        self.last_command.as_ref()
    }

    fn step(&mut self) {
        let Some(command) = self.last_command else {
            return;
        };
        for j in 0..NUMBER_OF_JOINTS {
            let error = command.joint_position[j] - self.state.measured_joint_position[j];
            self.state.measured_joint_position[j] += TRACKING_GAIN * error;
        }
        self.state.measured_torque = command.torque;
        self.state.ipo_joint_position = command.joint_position;
    }
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FriSession for SimulatedSession {
    fn name(&self) -> &'static str {
        super::DRIVER_NAME
    }

    fn connect(&mut self, port: u16, remote_host: Option<&str>) -> Result<(), SessionError> {
        if self.refuse_connect {
            return Err(SessionError::ConnectFailed {
                port,
                reason: "simulated controller unreachable".to_string(),
            });
        }
        self.connected = true;
        self.last_command = None;
        self.state.session_state = SessionState::MonitoringWait;
        self.state.ipo_joint_position = self.state.measured_joint_position;
        self.state.tracking_performance = 0.0;
        debug!(
            "Simulated session connected on port {} (remote={:?})",
            port, remote_host
        );
        Ok(())
    }

    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.last_command = None;
        self.state.session_state = SessionState::Idle;
        self.state.tracking_performance = 0.0;
        debug!("Simulated session disconnected");
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read_frame(&mut self) -> Result<&RobotState, SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if self.pending_read_faults > 0 {
            self.pending_read_faults -= 1;
            return Err(SessionError::ReadFailed("injected fault".to_string()));
        }

        if self.state.session_state == SessionState::MonitoringWait {
            self.state.session_state = SessionState::MonitoringReady;
        }
        self.step();
        self.state.tracking_performance =
            if self.state.session_state == SessionState::CommandingActive {
                1.0
            } else {
                0.0
            };
        self.frames_sent += 1;
        trace!("Simulated frame {} ({:?})", self.frames_sent, self.state.session_state);
        Ok(&self.state)
    }

    fn write_frame(&mut self, command: &RobotCommand) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if self.pending_write_faults > 0 {
            self.pending_write_faults -= 1;
            return Err(SessionError::WriteFailed("injected fault".to_string()));
        }

        self.state.session_state = match self.state.session_state {
            SessionState::MonitoringReady => SessionState::CommandingWait,
            SessionState::CommandingWait | SessionState::CommandingActive => {
                SessionState::CommandingActive
            }
            other => other,
        };
        self.last_command = Some(*command);
        self.frames_received += 1;
        Ok(())
    }
}
