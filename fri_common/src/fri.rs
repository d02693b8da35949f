//! FRI session transport boundary.
//!
//! The session itself (UDP exchange with the robot controller) lives outside
//! this workspace; this module fixes the contract the hardware interface
//! relies on and the fixed-size records exchanged each cycle.

pub mod session;
pub mod types;
