//! Per-cycle FRI records.
//!
//! - `SessionState` - Phase of the FRI session as reported by the controller
//! - `RobotState` - Measured values received in one frame
//! - `RobotCommand` - Command record transmitted in one frame
//!
//! All arrays are sized to [`NUMBER_OF_JOINTS`]; a hardware interface with
//! fewer joints uses the leading slots.

use crate::consts::NUMBER_OF_JOINTS;
use serde::{Deserialize, Serialize};

/// FRI session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SessionState {
    /// No session with the controller.
    #[default]
    Idle = 0,
    /// Connected, controller waiting for good communication quality.
    MonitoringWait = 1,
    /// Monitoring with sufficient quality, commanding may start.
    MonitoringReady = 2,
    /// Controller waits for the client to start commanding.
    CommandingWait = 3,
    /// Commands are applied by the controller.
    CommandingActive = 4,
}

impl SessionState {
    /// Whether the controller applies commands sent in this phase.
    pub const fn is_commanding(self) -> bool {
        matches!(self, SessionState::CommandingWait | SessionState::CommandingActive)
    }

    /// Numeric value exposed through the scalar state descriptor.
    pub const fn as_f64(self) -> f64 {
        self as u8 as f64
    }
}

/// Measured values of one received frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    /// Session phase reported with this frame.
    pub session_state: SessionState,
    /// Measured joint positions in radians.
    pub measured_joint_position: [f64; NUMBER_OF_JOINTS],
    /// Measured joint torques in Nm.
    pub measured_torque: [f64; NUMBER_OF_JOINTS],
    /// Position of the controller's own interpolator in radians.
    pub ipo_joint_position: [f64; NUMBER_OF_JOINTS],
    /// Tracking quality, 0.0 (none) to 1.0 (perfect).
    pub tracking_performance: f64,
}

impl Default for RobotState {
    fn default() -> Self {
        Self {
            session_state: SessionState::Idle,
            measured_joint_position: [0.0; NUMBER_OF_JOINTS],
            measured_torque: [0.0; NUMBER_OF_JOINTS],
            ipo_joint_position: [0.0; NUMBER_OF_JOINTS],
            tracking_performance: 0.0,
        }
    }
}

/// Command record transmitted in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotCommand {
    /// Commanded joint positions in radians.
    pub joint_position: [f64; NUMBER_OF_JOINTS],
    /// Superimposed joint torques in Nm (torque command mode only).
    pub torque: [f64; NUMBER_OF_JOINTS],
}

impl Default for RobotCommand {
    fn default() -> Self {
        Self {
            joint_position: [0.0; NUMBER_OF_JOINTS],
            torque: [0.0; NUMBER_OF_JOINTS],
        }
    }
}

impl RobotCommand {
    /// Copy `values` into the leading joint position slots.
    pub fn set_joint_position(&mut self, values: &[f64]) {
        let n = values.len().min(NUMBER_OF_JOINTS);
        self.joint_position[..n].copy_from_slice(&values[..n]);
    }

    /// Copy `values` into the leading torque slots.
    pub fn set_torque(&mut self, values: &[f64]) {
        let n = values.len().min(NUMBER_OF_JOINTS);
        self.torque[..n].copy_from_slice(&values[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_state_numeric_values() {
        assert_eq!(SessionState::Idle.as_f64(), 0.0);
        assert_eq!(SessionState::CommandingActive.as_f64(), 4.0);
        assert!(SessionState::CommandingWait.is_commanding());
        assert!(!SessionState::MonitoringReady.is_commanding());
    }

    #[test]
    fn command_setters_fill_leading_slots() {
        let mut cmd = RobotCommand::default();
        cmd.set_joint_position(&[1.0, 2.0]);
        cmd.set_torque(&[0.5; 9]);

        assert_eq!(&cmd.joint_position[..3], &[1.0, 2.0, 0.0]);
        assert!(cmd.torque.iter().all(|&t| t == 0.5));
    }
}
