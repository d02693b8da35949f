//! Hardware interface trait and error types.
//!
//! This module defines:
//! - `SystemInterface` trait - Capability set a motion-control framework drives
//! - `LifecycleState` enum - Lifecycle of a hardware interface
//! - `HardwareError` enum - Error types for lifecycle and cycle operations

use crate::hardware::descriptor::InterfaceDescriptor;
use crate::hardware::info::HardwareInfo;
use std::fmt;
use thiserror::Error;

/// Lifecycle of a hardware interface.
///
/// `Unconfigured → Inactive ⇄ Active`, any state `→ Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Constructed, topology not yet validated.
    #[default]
    Unconfigured,
    /// Buffers allocated, session closed.
    Inactive,
    /// Session open, cycles allowed.
    Active,
    /// Shut down; no further transitions.
    Finalized,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unconfigured => "unconfigured",
            LifecycleState::Inactive => "inactive",
            LifecycleState::Active => "active",
            LifecycleState::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// Error types for hardware interface operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HardwareError {
    /// Joint interface topology deviates from what the hardware supports.
    #[error("Topology error: {0}")]
    TopologyError(String),

    /// Session connection could not be opened.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Cycle operation invoked while not active.
    #[error("Hardware interface not active")]
    NotActive,

    /// `write()` before any frame of the current activation was read.
    #[error("No frame received since activation")]
    NoFrame,

    /// Receiving the measured state failed; buffers keep previous values.
    #[error("Session read error: {0}")]
    SessionReadError(String),

    /// Transmitting the command frame failed.
    #[error("Session write error: {0}")]
    SessionWriteError(String),

    /// Lifecycle operation not allowed in the current state.
    #[error("Cannot {operation} while {from}")]
    InvalidTransition {
        /// State the interface was in.
        from: LifecycleState,
        /// Rejected operation.
        operation: &'static str,
    },

    /// Invalid configuration or parameter value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No driver registered under the requested name.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Descriptor index or parameter name not exported by this interface.
    #[error("Unknown interface: {0}")]
    UnknownInterface(String),
}

/// Capability set a motion-control framework binds to.
///
/// # Lifecycle
///
/// 1. `initialize()` - Validate topology, allocate buffers (Unconfigured → Inactive)
/// 2. `activate()` - Open the session (Inactive → Active)
/// 3. `read()` / `write()` - Once per control cycle while Active
/// 4. `deactivate()` - Close the session (Active → Inactive)
/// 5. `finalize()` - Tear down (any → Finalized)
///
/// # Value access
///
/// Exported descriptors are addressed by their index in the exported list.
/// The framework reads state slots and writes command slots between `read()`
/// and `write()`. Parameters are a separate slot family for runtime tuning
/// and never carry motion commands.
///
/// # Threading
///
/// All methods take the receiver exclusively; the caller serializes calls
/// from a single control thread.
pub trait SystemInterface: Send {
    /// Interface identifier (e.g. "robot_control_client").
    fn name(&self) -> &str;

    /// Current lifecycle state.
    fn lifecycle_state(&self) -> LifecycleState;

    /// Validate `info` and size all buffers to its joint count.
    ///
    /// # Errors
    /// `HardwareError::TopologyError` if any joint deviates from the
    /// supported interface layout.
    fn initialize(&mut self, info: &HardwareInfo) -> Result<(), HardwareError>;

    /// Open the session.
    ///
    /// # Errors
    /// `HardwareError::ConnectionError` if the session cannot connect; the
    /// interface stays inactive.
    fn activate(&mut self) -> Result<(), HardwareError>;

    /// Close the session. Idempotent.
    fn deactivate(&mut self) -> Result<(), HardwareError>;

    /// Close the session if open and enter `Finalized`.
    fn finalize(&mut self) -> Result<(), HardwareError>;

    /// Pull one frame of measured state into the state buffers.
    fn read(&mut self) -> Result<(), HardwareError>;

    /// Push the command buffers to the session.
    ///
    /// # Errors
    /// `HardwareError::NoFrame` if no frame was read since activation.
    fn write(&mut self) -> Result<(), HardwareError>;

    /// State slots, read-only to the framework.
    fn export_state_descriptors(&self) -> Vec<InterfaceDescriptor>;

    /// Command slots, written by the framework.
    fn export_command_descriptors(&self) -> Vec<InterfaceDescriptor>;

    /// Value of state slot `index`.
    fn state_value(&self, index: usize) -> Option<f64>;

    /// Value of command slot `index`.
    fn command_value(&self, index: usize) -> Option<f64>;

    /// Write command slot `index`.
    ///
    /// # Errors
    /// `HardwareError::UnknownInterface` if `index` was not exported.
    fn set_command_value(&mut self, index: usize, value: f64) -> Result<(), HardwareError>;

    /// Tuning parameters. Default: none.
    fn export_parameter_descriptors(&self) -> Vec<InterfaceDescriptor> {
        Vec::new()
    }

    /// Value of the parameter `prefix/name`. Default: none.
    fn parameter(&self, _full_name: &str) -> Option<f64> {
        None
    }

    /// Set the parameter `prefix/name`.
    /// Default: every name is unknown.
    fn set_parameter(&mut self, full_name: &str, _value: f64) -> Result<(), HardwareError> {
        Err(HardwareError::UnknownInterface(full_name.to_string()))
    }
}
