//! FRI session trait and error types.
//!
//! This module defines:
//! - `FriSession` trait - Transport driving one FRI exchange with the controller
//! - `SessionError` enum - Transport failures
//! - `SessionFactory` type alias - Factory function registered per transport

use crate::fri::types::{RobotCommand, RobotState};
use thiserror::Error;

/// Transport failures reported by a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Connection could not be opened.
    #[error("connect on port {port} failed: {reason}")]
    ConnectFailed {
        /// Local port that was requested.
        port: u16,
        /// Transport-specific reason.
        reason: String,
    },

    /// Operation requires an open connection.
    #[error("session is not connected")]
    NotConnected,

    /// Receiving a frame failed.
    #[error("frame receive failed: {0}")]
    ReadFailed(String),

    /// Sending a frame failed.
    #[error("frame send failed: {0}")]
    WriteFailed(String),
}

/// Factory function type for creating session instances.
pub type SessionFactory = fn() -> Box<dyn FriSession>;

/// One FRI exchange with a robot controller.
///
/// # Contract
///
/// - `connect()` / `disconnect()` open and close the transport;
///   `disconnect()` on a closed session is a no-op.
/// - `read_frame()` receives exactly one frame and blocks at most for one
///   cycle. The returned state is borrowed from the session and only valid
///   until the next call; callers copy what they need.
/// - `write_frame()` transmits exactly one command frame. The controller
///   expects one per received frame.
pub trait FriSession: Send {
    /// Transport identifier (e.g. "simulation", "udp").
    fn name(&self) -> &'static str;

    /// Open the connection on `port`, optionally bound to `remote_host`.
    fn connect(&mut self, port: u16, remote_host: Option<&str>) -> Result<(), SessionError>;

    /// Close the connection.
    fn disconnect(&mut self);

    /// Whether the connection is currently open.
    fn is_connected(&self) -> bool;

    /// Receive one frame.
    fn read_frame(&mut self) -> Result<&RobotState, SessionError>;

    /// Transmit one command frame.
    fn write_frame(&mut self, command: &RobotCommand) -> Result<(), SessionError>;
}
