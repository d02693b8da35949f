//! Simulation transport.
//!
//! Emulates the controller side of an FRI exchange without a robot or
//! network, for development and testing.

mod session;

pub use session::SimulatedSession;

use fri_common::fri::session::FriSession;

/// Registry name of the simulation transport.
pub const DRIVER_NAME: &str = "simulation";

/// Factory function to create a simulated session.
pub fn create_session() -> Box<dyn FriSession> {
    Box::new(SimulatedSession::new())
}
