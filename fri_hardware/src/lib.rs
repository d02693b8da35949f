//! # FRI Hardware Interface
//!
//! Adapts a periodic FRI session with a robot controller to the
//! [`SystemInterface`](fri_common::hardware::interface::SystemInterface)
//! contract driven by a motion-control loop.
//!
//! # Module Structure
//!
//! - [`client`] - `RobotControlClient`, lifecycle and cyclic read/write
//! - [`lifecycle`] - Lifecycle transition table
//! - [`topology`] - Joint interface validation
//! - [`buffers`] - State and command buffers
//! - [`throttle`] - Receive-multiplier throttle
//! - [`command`] - Command synthesis per command mode
//! - [`driver_registry`] - Session transport factories
//! - [`drivers`] - Built-in session transports
//! - [`controller`] - Controller seam and joint hold controller
//! - [`config`] - Control node configuration
//! - [`node`] - Control node read → update → write loop
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         fri_hardware                            │
//! │  ┌─────────────┐    ┌────────────────────┐    ┌──────────────┐  │
//! │  │ ControlNode │───►│ RobotControlClient │───►│  FriSession  │  │
//! │  │ (cycle loop)│    │ (SystemInterface)  │    │ (trait obj.) │  │
//! │  └──────┬──────┘    └─────────┬──────────┘    └──────▲───────┘  │
//! │         │                     │                      │          │
//! │         ▼                     ▼                      │          │
//! │  ┌─────────────┐    ┌────────────────────┐    ┌──────┴───────┐  │
//! │  │ Controller  │    │ throttle + command │    │DriverRegistry│  │
//! │  └─────────────┘    └────────────────────┘    └──────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod buffers;
pub mod client;
pub mod command;
pub mod config;
pub mod controller;
pub mod driver_registry;
pub mod drivers;
pub mod lifecycle;
pub mod node;
pub mod throttle;
pub mod topology;

pub use crate::client::{ClientDiagnostics, RobotControlClient};
pub use crate::config::NodeConfig;
pub use crate::controller::{Controller, JointHoldController};
pub use crate::driver_registry::DriverRegistry;
pub use crate::node::{ControlNode, CycleOutcome, CycleStats};
