//! Session transport registry.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving FRI
//! session factories by name. Built once at startup and handed to the
//! control node; no global state.

use crate::drivers::register_builtin_drivers;
use fri_common::fri::session::{FriSession, SessionFactory};
use fri_common::hardware::interface::HardwareError;
use std::collections::HashMap;

/// Registry of available session transports.
pub struct DriverRegistry {
    factories: HashMap<&'static str, SessionFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in transports.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        register_builtin_drivers(&mut registry);
        registry
    }

    /// Register a session factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: SessionFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a session factory by name.
    pub fn get_factory(&self, name: &str) -> Option<SessionFactory> {
        self.factories.get(name).copied()
    }

    /// Create a session by driver name.
    ///
    /// # Errors
    /// Returns `HardwareError::DriverNotFound` if no driver with the given name is registered.
    pub fn create_session(&self, name: &str) -> Result<Box<dyn FriSession>, HardwareError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| HardwareError::DriverNotFound(name.to_string()))?;
        Ok(factory())
    }

    /// List all registered driver names.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fri_common::fri::session::SessionError;
    use fri_common::fri::types::{RobotCommand, RobotState};

    struct NullSession {
        state: RobotState,
    }

    impl FriSession for NullSession {
        fn name(&self) -> &'static str {
            "null"
        }

        fn connect(&mut self, _port: u16, _remote_host: Option<&str>) -> Result<(), SessionError> {
            Ok(())
        }

        fn disconnect(&mut self) {}

        fn is_connected(&self) -> bool {
            false
        }

        fn read_frame(&mut self) -> Result<&RobotState, SessionError> {
            Ok(&self.state)
        }

        fn write_frame(&mut self, _command: &RobotCommand) -> Result<(), SessionError> {
            Ok(())
        }
    }

    fn create_null_session() -> Box<dyn FriSession> {
        Box::new(NullSession {
            state: RobotState::default(),
        })
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg = DriverRegistry::new();
        reg.register("null", create_null_session);

        let session = reg.create_session("null").expect("should create");
        assert_eq!(session.name(), "null");
    }

    #[test]
    fn registry_driver_not_found() {
        let reg = DriverRegistry::new();
        let result = reg.create_session("udp");
        assert!(matches!(result, Err(HardwareError::DriverNotFound(_))));
    }

    #[test]
    fn registry_list_drivers() {
        let mut reg = DriverRegistry::new();
        reg.register("alpha", create_null_session);
        reg.register("beta", create_null_session);

        let mut names = reg.list_drivers();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn builtin_registry_has_simulation() {
        let reg = DriverRegistry::with_builtin_drivers();
        assert!(reg.get_factory("simulation").is_some());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = DriverRegistry::new();
        reg.register("dup", create_null_session);
        reg.register("dup", create_null_session);
    }
}
