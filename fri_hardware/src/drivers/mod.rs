//! Session transport implementations.
//!
//! - [`simulation`] - In-process FRI controller for development and testing
//!
//! # Adding New Transports
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `FriSession` trait from `fri_common::fri::session`
//! 3. Register the factory in [`register_builtin_drivers`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register all built-in transports into `registry`.
pub fn register_builtin_drivers(registry: &mut DriverRegistry) {
    registry.register(simulation::DRIVER_NAME, simulation::create_session);
}
