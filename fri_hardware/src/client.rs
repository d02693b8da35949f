//! `RobotControlClient`: FRI session exposed as a [`SystemInterface`].
//!
//! The client owns the session and the joint buffers. A control loop drives
//! it once per cycle:
//!
//! ```text
//! read()  : session frame ──copy──► measured_position / measured_effort
//!           (framework writes commanded_position / commanded_effort)
//! write() : throttle.tick() ? synthesize() : keep record ──► session frame
//! ```
//!
//! # Timing Contracts
//!
//! | Operation | Blocking | Session calls when inactive |
//! |-----------|----------|-----------------------------|
//! | `read()` | one frame at most | none |
//! | `write()` | one frame at most | none |
//!
//! A frame is transmitted on every active `write()`, whether or not the
//! logical command was recomputed this cycle. The exception is a `write()`
//! before the first frame of an activation was read: there is no
//! interpolator position to hold yet, so it fails with `NoFrame` and
//! transmits nothing.

use crate::buffers::JointBuffers;
use crate::command::{hold_command, synthesize};
use crate::lifecycle::{LifecycleEvent, LifecycleMachine, TransitionResult};
use crate::throttle::ReceiveThrottle;
use crate::topology::validate_topology;
use fri_common::consts::{
    RECEIVE_MULTIPLIER_PARAMETER, SESSION_STATE_INTERFACE, SESSION_STATE_PREFIX, TIMING_PREFIX,
};
use fri_common::fri::session::FriSession;
use fri_common::fri::types::{RobotCommand, RobotState, SessionState};
use fri_common::hardware::config::{ClientConfig, CommandMode};
use fri_common::hardware::descriptor::InterfaceDescriptor;
use fri_common::hardware::info::{HW_IF_EFFORT, HW_IF_POSITION, HardwareInfo};
use fri_common::hardware::interface::{HardwareError, LifecycleState, SystemInterface};
use tracing::{debug, error, info, trace, warn};

/// Interface name reported by [`SystemInterface::name`].
pub const CLIENT_NAME: &str = "robot_control_client";

/// Counters kept by the client for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientDiagnostics {
    /// Frames received successfully.
    pub frames_read: u64,
    /// Frames transmitted successfully.
    pub frames_written: u64,
    /// Logical command recomputations.
    pub syntheses: u64,
    /// Failed receives.
    pub read_errors: u64,
    /// Failed transmits.
    pub write_errors: u64,
}

/// FRI robot control client.
pub struct RobotControlClient {
    session: Box<dyn FriSession>,
    config: ClientConfig,
    lifecycle: LifecycleMachine,
    joint_names: Vec<String>,
    buffers: JointBuffers,
    throttle: ReceiveThrottle,
    command_mode: CommandMode,
    /// Copy of the last received frame.
    latest_frame: RobotState,
    session_state: SessionState,
    tracking_performance: f64,
    /// Record retransmitted until the next synthesis.
    outgoing: RobotCommand,
    /// Whether a frame was read since the last activation.
    frame_valid: bool,
    diagnostics: ClientDiagnostics,
}

impl RobotControlClient {
    /// Create a client over `session`.
    ///
    /// # Errors
    /// `HardwareError::ConfigError` if `config` is invalid.
    pub fn new(session: Box<dyn FriSession>, config: ClientConfig) -> Result<Self, HardwareError> {
        config
            .validate()
            .map_err(|e| HardwareError::ConfigError(e.to_string()))?;
        let throttle = ReceiveThrottle::new(config.receive_multiplier)?;

        Ok(Self {
            session,
            command_mode: config.command_mode,
            config,
            lifecycle: LifecycleMachine::new(),
            joint_names: Vec::new(),
            buffers: JointBuffers::default(),
            throttle,
            latest_frame: RobotState::default(),
            session_state: SessionState::Idle,
            tracking_performance: 0.0,
            outgoing: RobotCommand::default(),
            frame_valid: false,
            diagnostics: ClientDiagnostics::default(),
        })
    }

    /// Whether cycles are allowed.
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Number of joints fixed at initialization.
    pub fn joint_count(&self) -> usize {
        self.buffers.len()
    }

    /// Joint names in topology order.
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// State and command buffers.
    pub fn buffers(&self) -> &JointBuffers {
        &self.buffers
    }

    /// Writable command buffers for in-process controllers.
    pub fn buffers_mut(&mut self) -> &mut JointBuffers {
        &mut self.buffers
    }

    /// Session phase from the last received frame.
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Tracking quality from the last received frame.
    pub fn tracking_performance(&self) -> f64 {
        self.tracking_performance
    }

    /// Cycles since the last synthesis.
    pub fn receive_counter(&self) -> u32 {
        self.throttle.counter()
    }

    /// Cycles per synthesis.
    pub fn receive_multiplier(&self) -> u32 {
        self.throttle.multiplier()
    }

    /// Change the cycles per synthesis; applies from the next `write()`.
    pub fn set_receive_multiplier(&mut self, multiplier: u32) -> Result<(), HardwareError> {
        self.throttle.set_multiplier(multiplier)?;
        info!("receive_multiplier set to {}", multiplier);
        Ok(())
    }

    /// Command mode of the session.
    pub fn command_mode(&self) -> CommandMode {
        self.command_mode
    }

    /// Change the command mode. Only allowed while no session is open.
    pub fn set_command_mode(&mut self, mode: CommandMode) -> Result<(), HardwareError> {
        if self.is_active() {
            return Err(HardwareError::InvalidTransition {
                from: LifecycleState::Active,
                operation: "change command mode",
            });
        }
        self.command_mode = mode;
        Ok(())
    }

    /// Record that the last `write()` transmitted.
    pub fn outgoing_command(&self) -> &RobotCommand {
        &self.outgoing
    }

    /// Diagnostic counters.
    pub fn diagnostics(&self) -> ClientDiagnostics {
        self.diagnostics
    }

    fn transition(&mut self, event: LifecycleEvent) -> Result<LifecycleState, HardwareError> {
        let from = self.lifecycle.state();
        match self.lifecycle.check(event) {
            TransitionResult::Ok(next) => Ok(next),
            TransitionResult::Rejected(reason) => {
                debug!("{} rejected: {}", event.operation(), reason);
                Err(HardwareError::InvalidTransition {
                    from,
                    operation: event.operation(),
                })
            }
        }
    }

    fn commit(&mut self, event: LifecycleEvent) {
        self.lifecycle.handle_event(event);
    }
}

impl SystemInterface for RobotControlClient {
    fn name(&self) -> &str {
        CLIENT_NAME
    }

    fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    fn initialize(&mut self, info: &HardwareInfo) -> Result<(), HardwareError> {
        self.transition(LifecycleEvent::Initialize)?;

        let joint_count = validate_topology(info).inspect_err(|e| {
            error!("Hardware '{}' rejected: {}", info.name, e);
        })?;

        self.joint_names = info.joints.iter().map(|j| j.name.clone()).collect();
        self.buffers = JointBuffers::new(joint_count);
        self.commit(LifecycleEvent::Initialize);

        info!(
            "Initialized '{}' with {} joints (mode={:?}, receive_multiplier={})",
            info.name,
            joint_count,
            self.command_mode,
            self.throttle.multiplier()
        );
        Ok(())
    }

    fn activate(&mut self) -> Result<(), HardwareError> {
        self.transition(LifecycleEvent::Activate)?;

        info!("Activating client on port {}", self.config.port);
        if let Err(e) = self
            .session
            .connect(self.config.port, self.config.remote_host.as_deref())
        {
            error!("Could not connect: {}", e);
            return Err(HardwareError::ConnectionError(e.to_string()));
        }

        self.throttle.reset();
        self.frame_valid = false;
        self.commit(LifecycleEvent::Activate);
        info!("Activated client ({} session)", self.session.name());
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), HardwareError> {
        self.transition(LifecycleEvent::Deactivate)?;

        self.session.disconnect();
        self.commit(LifecycleEvent::Deactivate);
        info!("Deactivated client");
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), HardwareError> {
        if self.lifecycle.state() == LifecycleState::Finalized {
            return Ok(());
        }
        if self.session.is_connected() {
            self.session.disconnect();
        }
        self.commit(LifecycleEvent::Finalize);
        info!(
            "Finalized client after {} frames written",
            self.diagnostics.frames_written
        );
        Ok(())
    }

    fn read(&mut self) -> Result<(), HardwareError> {
        if !self.is_active() {
            return Err(HardwareError::NotActive);
        }

        let frame = match self.session.read_frame() {
            Ok(frame) => *frame,
            Err(e) => {
                self.diagnostics.read_errors += 1;
                error!("Failed to read data from controller: {}", e);
                return Err(HardwareError::SessionReadError(e.to_string()));
            }
        };

        self.buffers.store_measured(&frame);
        self.session_state = frame.session_state;
        self.tracking_performance = frame.tracking_performance;
        self.latest_frame = frame;
        if !self.frame_valid {
            self.outgoing = hold_command(&frame);
            self.frame_valid = true;
        }
        self.diagnostics.frames_read += 1;
        Ok(())
    }

    fn write(&mut self) -> Result<(), HardwareError> {
        if !self.is_active() {
            return Err(HardwareError::NotActive);
        }

        if !self.frame_valid {
            return Err(HardwareError::NoFrame);
        }

        if self.throttle.tick() {
            synthesize(
                self.command_mode,
                &self.buffers,
                &self.latest_frame,
                &mut self.outgoing,
            );
            self.diagnostics.syntheses += 1;
            trace!("Command synthesized ({:?})", self.command_mode);
        }

        if let Err(e) = self.session.write_frame(&self.outgoing) {
            self.diagnostics.write_errors += 1;
            warn!("Failed to send command to controller: {}", e);
            return Err(HardwareError::SessionWriteError(e.to_string()));
        }
        self.diagnostics.frames_written += 1;
        Ok(())
    }

    fn export_state_descriptors(&self) -> Vec<InterfaceDescriptor> {
        let mut descriptors = Vec::with_capacity(1 + 2 * self.joint_names.len());
        descriptors.push(InterfaceDescriptor::new(
            SESSION_STATE_PREFIX,
            SESSION_STATE_INTERFACE,
        ));
        for name in &self.joint_names {
            descriptors.push(InterfaceDescriptor::new(name, HW_IF_POSITION));
            descriptors.push(InterfaceDescriptor::new(name, HW_IF_EFFORT));
        }
        descriptors
    }

    fn export_command_descriptors(&self) -> Vec<InterfaceDescriptor> {
        let mut descriptors = Vec::with_capacity(2 * self.joint_names.len());
        for name in &self.joint_names {
            descriptors.push(InterfaceDescriptor::new(name, HW_IF_POSITION));
            descriptors.push(InterfaceDescriptor::new(name, HW_IF_EFFORT));
        }
        descriptors
    }

    fn state_value(&self, index: usize) -> Option<f64> {
        if index == 0 {
            return Some(self.session_state.as_f64());
        }
        let slot = index - 1;
        let joint = slot / 2;
        if slot % 2 == 0 {
            self.buffers.measured_position().get(joint).copied()
        } else {
            self.buffers.measured_effort().get(joint).copied()
        }
    }

    fn command_value(&self, index: usize) -> Option<f64> {
        let joint = index / 2;
        if index % 2 == 0 {
            self.buffers.commanded_position().get(joint).copied()
        } else {
            self.buffers.commanded_effort().get(joint).copied()
        }
    }

    fn set_command_value(&mut self, index: usize, value: f64) -> Result<(), HardwareError> {
        let joint = index / 2;
        let slot = if index % 2 == 0 {
            self.buffers.commanded_position_mut().get_mut(joint)
        } else {
            self.buffers.commanded_effort_mut().get_mut(joint)
        };
        match slot {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(HardwareError::UnknownInterface(format!(
                "command index {index}"
            ))),
        }
    }

    fn export_parameter_descriptors(&self) -> Vec<InterfaceDescriptor> {
        vec![InterfaceDescriptor::new(
            TIMING_PREFIX,
            RECEIVE_MULTIPLIER_PARAMETER,
        )]
    }

    fn parameter(&self, full_name: &str) -> Option<f64> {
        is_receive_multiplier(full_name).then(|| f64::from(self.throttle.multiplier()))
    }

    fn set_parameter(&mut self, full_name: &str, value: f64) -> Result<(), HardwareError> {
        if !is_receive_multiplier(full_name) {
            return Err(HardwareError::UnknownInterface(full_name.to_string()));
        }
        let integral = value.is_finite() && value.fract() == 0.0;
        if !integral || value < 1.0 || value > f64::from(u32::MAX) {
            return Err(HardwareError::ConfigError(format!(
                "receive_multiplier must be a positive integer, got {value}"
            )));
        }
        self.set_receive_multiplier(value as u32)
    }
}

impl Drop for RobotControlClient {
    fn drop(&mut self) {
        if self.session.is_connected() {
            self.session.disconnect();
        }
    }
}

fn is_receive_multiplier(full_name: &str) -> bool {
    full_name.split_once('/').is_some_and(|(prefix, name)| {
        prefix == TIMING_PREFIX && name == RECEIVE_MULTIPLIER_PARAMETER
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::simulation::SimulatedSession;

    fn client(config: ClientConfig) -> RobotControlClient {
        RobotControlClient::new(Box::new(SimulatedSession::new()), config).unwrap()
    }

    fn initialized(joints: usize) -> RobotControlClient {
        let mut c = client(ClientConfig::default());
        let mut info = HardwareInfo::lbr_arm("lbr");
        info.joints.truncate(joints);
        c.initialize(&info).unwrap();
        c
    }

    #[test]
    fn invalid_config_rejected() {
        let result = RobotControlClient::new(
            Box::new(SimulatedSession::new()),
            ClientConfig {
                receive_multiplier: 0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(HardwareError::ConfigError(_))));
    }

    #[test]
    fn descriptors_follow_joint_order() {
        let c = initialized(2);
        let states: Vec<String> = c
            .export_state_descriptors()
            .iter()
            .map(InterfaceDescriptor::full_name)
            .collect();
        assert_eq!(
            states,
            vec![
                "state/fri_state",
                "joint_a1/position",
                "joint_a1/effort",
                "joint_a2/position",
                "joint_a2/effort",
            ]
        );
        assert_eq!(c.export_command_descriptors().len(), 4);
        assert_eq!(
            c.export_parameter_descriptors()[0].full_name(),
            "timing/receive_multiplier"
        );
    }

    #[test]
    fn command_slots_map_to_buffers() {
        let mut c = initialized(2);
        c.set_command_value(2, 0.25).unwrap();
        c.set_command_value(3, -4.0).unwrap();
        assert_eq!(c.buffers().commanded_position(), &[0.0, 0.25]);
        assert_eq!(c.buffers().commanded_effort(), &[0.0, -4.0]);
        assert_eq!(c.command_value(3), Some(-4.0));
        assert!(matches!(
            c.set_command_value(4, 1.0),
            Err(HardwareError::UnknownInterface(_))
        ));
        assert_eq!(c.command_value(4), None);
    }

    #[test]
    fn state_slot_zero_is_session_state() {
        let c = initialized(1);
        assert_eq!(c.state_value(0), Some(SessionState::Idle.as_f64()));
        assert_eq!(c.state_value(1), Some(0.0));
        assert_eq!(c.state_value(3), None);
    }

    #[test]
    fn receive_multiplier_parameter() {
        let mut c = initialized(1);
        assert_eq!(c.parameter("timing/receive_multiplier"), Some(1.0));
        c.set_parameter("timing/receive_multiplier", 3.0).unwrap();
        assert_eq!(c.receive_multiplier(), 3);

        for bad in [0.0, -2.0, 2.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                c.set_parameter("timing/receive_multiplier", bad),
                Err(HardwareError::ConfigError(_))
            ));
        }
        assert_eq!(c.receive_multiplier(), 3);
        assert!(matches!(
            c.set_parameter("timing/period", 1.0),
            Err(HardwareError::UnknownInterface(_))
        ));
        assert_eq!(c.parameter("receive_multiplier"), None);
    }

    #[test]
    fn command_mode_locked_while_active() {
        let mut c = initialized(7);
        c.set_command_mode(CommandMode::Torque).unwrap();
        c.activate().unwrap();
        assert!(c.set_command_mode(CommandMode::Position).is_err());
        assert_eq!(c.command_mode(), CommandMode::Torque);
        c.deactivate().unwrap();
        c.set_command_mode(CommandMode::Position).unwrap();
    }

    #[test]
    fn initialize_twice_rejected() {
        let mut c = initialized(3);
        let result = c.initialize(&HardwareInfo::lbr_arm("again"));
        assert!(matches!(
            result,
            Err(HardwareError::InvalidTransition { operation: "initialize", .. })
        ));
        assert_eq!(c.joint_count(), 3);
    }

    #[test]
    fn failed_initialize_stays_unconfigured() {
        let mut c = client(ClientConfig::default());
        let mut info = HardwareInfo::lbr_arm("lbr");
        info.joints[4].command_interfaces.clear();
        assert!(matches!(
            c.initialize(&info),
            Err(HardwareError::TopologyError(_))
        ));
        assert_eq!(c.lifecycle_state(), LifecycleState::Unconfigured);
        assert_eq!(c.joint_count(), 0);
    }

    #[test]
    fn finalize_is_terminal_and_idempotent() {
        let mut c = initialized(7);
        c.activate().unwrap();
        c.finalize().unwrap();
        c.finalize().unwrap();
        assert_eq!(c.lifecycle_state(), LifecycleState::Finalized);
        assert!(c.activate().is_err());
        assert_eq!(c.read(), Err(HardwareError::NotActive));
    }
}
