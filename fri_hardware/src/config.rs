//! Control node configuration.
//!
//! ```toml
//! cycle_time_us = 5000
//! driver = "simulation"
//!
//! [shared]
//! service_name = "lbr-control-node"
//!
//! [client]
//! port = 30200
//! command_mode = "position"
//! receive_multiplier = 1
//!
//! [activation]
//! max_attempts = 3
//! retry_interval_ms = 500
//!
//! [[joints]]
//! name = "joint_a1"
//! command_interfaces = ["position", "effort"]
//! state_interfaces = ["position", "effort"]
//! ```
//!
//! Without `[[joints]]` tables the node drives a 7-joint LBR arm.

use fri_common::config::{ConfigError, SharedConfig};
use fri_common::consts::DEFAULT_CYCLE_TIME_US;
use fri_common::hardware::config::ClientConfig;
use fri_common::hardware::info::{ComponentInfo, HardwareInfo};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_cycle_time_us() -> u32 {
    DEFAULT_CYCLE_TIME_US
}

fn default_driver() -> String {
    crate::drivers::simulation::DRIVER_NAME.to_string()
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_interval_ms() -> u64 {
    500
}

/// How often `activate` is retried before the node gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Connection attempts, at least 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between attempts.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_interval_ms: default_retry_interval_ms(),
        }
    }
}

impl ActivationConfig {
    /// Pause between attempts as a `Duration`.
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

/// Complete configuration of a `fri_control_node` process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Shared service settings.
    pub shared: SharedConfig,

    /// Control cycle period in microseconds.
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,

    /// Session transport registered in the driver registry.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// FRI client settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Activation retry policy.
    #[serde(default)]
    pub activation: ActivationConfig,

    /// Joint topology; empty means the default LBR arm.
    #[serde(default)]
    pub joints: Vec<ComponentInfo>,
}

impl NodeConfig {
    /// Configuration for `service_name` with every other field defaulted.
    pub fn new(service_name: &str) -> Self {
        Self {
            shared: SharedConfig {
                log_level: Default::default(),
                service_name: service_name.to_string(),
            },
            cycle_time_us: DEFAULT_CYCLE_TIME_US,
            driver: default_driver(),
            client: ClientConfig::default(),
            activation: ActivationConfig::default(),
            joints: Vec::new(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. Shared and client sections are valid
    /// 2. `cycle_time_us` > 0
    /// 3. `driver` is not blank
    /// 4. `activation.max_attempts` >= 1
    ///
    /// Joint topology is checked by the hardware interface at initialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.client.validate()?;

        if self.cycle_time_us == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_us must be greater than 0".to_string(),
            ));
        }
        if self.driver.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "driver cannot be empty".to_string(),
            ));
        }
        if self.activation.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "activation.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Control cycle period.
    pub fn cycle_time(&self) -> Duration {
        Duration::from_micros(u64::from(self.cycle_time_us))
    }

    /// Hardware description handed to `initialize`.
    pub fn hardware_info(&self) -> HardwareInfo {
        if self.joints.is_empty() {
            return HardwareInfo::lbr_arm(&self.shared.service_name);
        }
        HardwareInfo {
            name: self.shared.service_name.clone(),
            joints: self.joints.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fri_common::config::ConfigLoader;
    use fri_common::hardware::config::CommandMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn minimal_file_uses_defaults() {
        let config = NodeConfig::from_toml(
            r#"
[shared]
service_name = "lbr"
"#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.cycle_time(), Duration::from_millis(5));
        assert_eq!(config.driver, "simulation");
        assert_eq!(config.client, ClientConfig::default());
        assert_eq!(config.activation.max_attempts, 1);
        assert_eq!(config.hardware_info().joints.len(), 7);
    }

    #[test]
    fn full_file_round_trips_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"cycle_time_us = 1000
driver = "simulation"

[shared]
service_name = "iiwa"
log_level = "debug"

[client]
port = 30201
remote_host = "192.170.10.2"
command_mode = "position_torque"
receive_multiplier = 4

[activation]
max_attempts = 5
retry_interval_ms = 20

[[joints]]
name = "a1"
command_interfaces = ["position", "effort"]
state_interfaces = ["position", "effort"]

[[joints]]
name = "a2"
command_interfaces = ["position", "effort"]
state_interfaces = ["position", "effort"]
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = NodeConfig::load(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.client.port, 30201);
        assert_eq!(config.client.command_mode, CommandMode::Torque);
        assert_eq!(config.client.receive_multiplier, 4);
        assert_eq!(config.activation.retry_interval(), Duration::from_millis(20));

        let info = config.hardware_info();
        assert_eq!(info.name, "iiwa");
        assert_eq!(info.joints.len(), 2);
        assert_eq!(info.joints[1].command_interfaces[1].name, "effort");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = NodeConfig::new("lbr");
        config.validate().unwrap();

        config.cycle_time_us = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::new("lbr");
        config.client.receive_multiplier = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::new("lbr");
        config.activation.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::new("lbr");
        config.driver = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
