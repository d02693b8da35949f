//! Controllers updated between `read()` and `write()`.
//!
//! A controller binds to a hardware interface through its exported
//! descriptors only; it never sees the concrete adapter type.

use fri_common::hardware::descriptor::find_descriptor;
use fri_common::hardware::info::{HW_IF_EFFORT, HW_IF_POSITION};
use fri_common::hardware::interface::{HardwareError, SystemInterface};
use std::time::Duration;
use tracing::{debug, info};

/// Per-cycle command producer.
pub trait Controller: Send {
    /// Controller name for logs.
    fn name(&self) -> &str;

    /// Resolve descriptor indexes against an initialized interface.
    fn configure(&mut self, hardware: &dyn SystemInterface) -> Result<(), HardwareError>;

    /// Called after the interface became active.
    fn on_activate(&mut self) {}

    /// Write commands for this cycle from the freshly read state.
    fn update(
        &mut self,
        hardware: &mut dyn SystemInterface,
        period: Duration,
    ) -> Result<(), HardwareError>;
}

/// Slot indexes for one joint.
#[derive(Debug, Clone, Copy)]
struct JointSlots {
    state_position: usize,
    command_position: usize,
    command_effort: usize,
}

/// Holds every joint at the position measured on the first cycle after
/// activation, with zero superimposed effort.
#[derive(Debug, Default)]
pub struct JointHoldController {
    joints: Vec<JointSlots>,
    hold_position: Option<Vec<f64>>,
}

impl JointHoldController {
    /// Unconfigured controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latched hold position, once the first update ran.
    pub fn hold_position(&self) -> Option<&[f64]> {
        self.hold_position.as_deref()
    }
}

impl Controller for JointHoldController {
    fn name(&self) -> &str {
        "joint_hold"
    }

    fn configure(&mut self, hardware: &dyn SystemInterface) -> Result<(), HardwareError> {
        let states = hardware.export_state_descriptors();
        let commands = hardware.export_command_descriptors();

        let mut joints = Vec::new();
        for descriptor in commands.iter().filter(|d| d.interface_name == HW_IF_POSITION) {
            let joint = descriptor.prefix_name.as_str();
            let missing = |iface: &str| HardwareError::UnknownInterface(format!("{joint}/{iface}"));

            joints.push(JointSlots {
                state_position: find_descriptor(&states, joint, HW_IF_POSITION)
                    .ok_or_else(|| missing(HW_IF_POSITION))?,
                command_position: find_descriptor(&commands, joint, HW_IF_POSITION)
                    .ok_or_else(|| missing(HW_IF_POSITION))?,
                command_effort: find_descriptor(&commands, joint, HW_IF_EFFORT)
                    .ok_or_else(|| missing(HW_IF_EFFORT))?,
            });
        }

        info!("Controller '{}' bound to {} joints", self.name(), joints.len());
        self.joints = joints;
        self.hold_position = None;
        Ok(())
    }

    fn on_activate(&mut self) {
        self.hold_position = None;
    }

    fn update(
        &mut self,
        hardware: &mut dyn SystemInterface,
        _period: Duration,
    ) -> Result<(), HardwareError> {
        if self.hold_position.is_none() {
            let mut latched = Vec::with_capacity(self.joints.len());
            for slots in &self.joints {
                let value = hardware.state_value(slots.state_position).ok_or_else(|| {
                    HardwareError::UnknownInterface(format!("state index {}", slots.state_position))
                })?;
                latched.push(value);
            }
            debug!("Holding position {:?}", latched);
            self.hold_position = Some(latched);
        }

        if let Some(hold) = &self.hold_position {
            for (slots, &position) in self.joints.iter().zip(hold) {
                hardware.set_command_value(slots.command_position, position)?;
                hardware.set_command_value(slots.command_effort, 0.0)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RobotControlClient;
    use crate::drivers::simulation::SimulatedSession;
    use fri_common::hardware::config::ClientConfig;
    use fri_common::hardware::info::HardwareInfo;

    fn active_client(start: &[f64]) -> RobotControlClient {
        let session = SimulatedSession::new().with_initial_position(start);
        let mut client =
            RobotControlClient::new(Box::new(session), ClientConfig::default()).unwrap();
        let mut info = HardwareInfo::lbr_arm("lbr");
        info.joints.truncate(start.len());
        client.initialize(&info).unwrap();
        client.activate().unwrap();
        client
    }

    #[test]
    fn holds_first_measured_position() {
        let mut client = active_client(&[0.1, -0.2, 0.3]);
        let mut controller = JointHoldController::new();
        controller.configure(&client).unwrap();
        controller.on_activate();

        client.set_command_value(1, 5.0).unwrap();
        client.read().unwrap();
        controller
            .update(&mut client, Duration::from_millis(5))
            .unwrap();

        assert_eq!(controller.hold_position(), Some(&[0.1, -0.2, 0.3][..]));
        assert_eq!(client.buffers().commanded_position(), &[0.1, -0.2, 0.3]);
        assert_eq!(client.buffers().commanded_effort(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn hold_position_stays_latched() {
        let mut client = active_client(&[1.0]);
        let mut controller = JointHoldController::new();
        controller.configure(&client).unwrap();

        client.read().unwrap();
        controller.update(&mut client, Duration::ZERO).unwrap();
        client.buffers_mut().commanded_position_mut()[0] = 2.0;
        controller.update(&mut client, Duration::ZERO).unwrap();
        assert_eq!(client.buffers().commanded_position(), &[1.0]);

        controller.on_activate();
        assert!(controller.hold_position().is_none());
    }
}
