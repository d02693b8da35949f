//! Joint state and command buffers.
//!
//! Sized once at initialization; the accessors only hand out slices, so the
//! lengths cannot change afterwards.

use fri_common::fri::types::RobotState;

/// Measured state and framework commands, one slot per joint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointBuffers {
    measured_position: Vec<f64>,
    measured_effort: Vec<f64>,
    commanded_position: Vec<f64>,
    commanded_effort: Vec<f64>,
}

impl JointBuffers {
    /// Zeroed buffers for `joint_count` joints.
    pub fn new(joint_count: usize) -> Self {
        Self {
            measured_position: vec![0.0; joint_count],
            measured_effort: vec![0.0; joint_count],
            commanded_position: vec![0.0; joint_count],
            commanded_effort: vec![0.0; joint_count],
        }
    }

    /// Joint count.
    pub fn len(&self) -> usize {
        self.measured_position.len()
    }

    /// Whether no joints are allocated.
    pub fn is_empty(&self) -> bool {
        self.measured_position.is_empty()
    }

    /// Measured joint positions (rad).
    pub fn measured_position(&self) -> &[f64] {
        &self.measured_position
    }

    /// Measured joint torques (Nm).
    pub fn measured_effort(&self) -> &[f64] {
        &self.measured_effort
    }

    /// Commanded joint positions (rad).
    pub fn commanded_position(&self) -> &[f64] {
        &self.commanded_position
    }

    /// Commanded joint torques (Nm).
    pub fn commanded_effort(&self) -> &[f64] {
        &self.commanded_effort
    }

    /// Writable commanded joint positions.
    pub fn commanded_position_mut(&mut self) -> &mut [f64] {
        &mut self.commanded_position
    }

    /// Writable commanded joint torques.
    pub fn commanded_effort_mut(&mut self) -> &mut [f64] {
        &mut self.commanded_effort
    }

    /// Copy the measured values of a received frame into the state buffers.
    pub(crate) fn store_measured(&mut self, frame: &RobotState) {
        let n = self.len();
        self.measured_position
            .copy_from_slice(&frame.measured_joint_position[..n]);
        self.measured_effort
            .copy_from_slice(&frame.measured_torque[..n]);
    }
}
