//! Command synthesis.
//!
//! Fills the outgoing FRI command record from the command buffers. Invoked
//! only on throttle recompute cycles; on every other cycle the record is
//! retransmitted unchanged.

use crate::buffers::JointBuffers;
use fri_common::fri::types::{RobotCommand, RobotState};
use fri_common::hardware::config::CommandMode;

/// Write the logical command for `mode` into `out`.
///
/// - `Position`: joint positions from the command buffer; torques untouched.
/// - `Torque`: joint positions follow the session interpolator in `frame`,
///   torques from the command buffer.
pub fn synthesize(
    mode: CommandMode,
    buffers: &JointBuffers,
    frame: &RobotState,
    out: &mut RobotCommand,
) {
    match mode {
        CommandMode::Position => {
            out.set_joint_position(buffers.commanded_position());
        }
        CommandMode::Torque => {
            out.joint_position = frame.ipo_joint_position;
            out.set_torque(buffers.commanded_effort());
        }
    }
    // TODO: digital and analog output values once the session exposes them.
}

/// Hold record: interpolator position, zero torque.
pub fn hold_command(frame: &RobotState) -> RobotCommand {
    RobotCommand {
        joint_position: frame.ipo_joint_position,
        ..RobotCommand::default()
    }
}
