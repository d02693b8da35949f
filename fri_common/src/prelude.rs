//! Prelude module for common re-exports.
//!
//! ```rust
//! use fri_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::hardware::config::{ClientConfig, CommandMode};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{
    DEFAULT_CYCLE_TIME_US, DEFAULT_RECEIVE_MULTIPLIER, FRI_DEFAULT_PORT, NUMBER_OF_JOINTS,
};

// ─── Hardware interface ─────────────────────────────────────────────
pub use crate::hardware::descriptor::{InterfaceDescriptor, find_descriptor};
pub use crate::hardware::info::{
    ComponentInfo, HW_IF_EFFORT, HW_IF_POSITION, HardwareInfo, InterfaceInfo,
};
pub use crate::hardware::interface::{HardwareError, LifecycleState, SystemInterface};

// ─── FRI session ────────────────────────────────────────────────────
pub use crate::fri::session::{FriSession, SessionError, SessionFactory};
pub use crate::fri::types::{RobotCommand, RobotState, SessionState};

/// Default control cycle time as Duration.
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_micros(DEFAULT_CYCLE_TIME_US as u64);
