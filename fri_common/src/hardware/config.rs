//! Adapter configuration types.
//!
//! - `CommandMode` - What the command synthesizer writes into each frame
//! - `ClientConfig` - `[client]` section of the node configuration

use crate::config::ConfigError;
use crate::consts::{DEFAULT_RECEIVE_MULTIPLIER, FRI_DEFAULT_PORT};
use serde::{Deserialize, Serialize};

fn default_port() -> u16 {
    FRI_DEFAULT_PORT
}

fn default_receive_multiplier() -> u32 {
    DEFAULT_RECEIVE_MULTIPLIER
}

/// Content of the outgoing command record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandMode {
    /// Joint positions from the command buffer.
    #[default]
    Position,
    /// Joint positions from the session interpolator, torques from the
    /// command buffer superimposed.
    #[serde(alias = "position_torque")]
    Torque,
}

/// FRI client settings.
///
/// ```toml
/// [client]
/// port = 30200
/// command_mode = "torque"
/// receive_multiplier = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Local port the session listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Controller address; `None` accepts any.
    #[serde(default)]
    pub remote_host: Option<String>,

    /// Command mode for the whole session.
    #[serde(default)]
    pub command_mode: CommandMode,

    /// Physical cycles per logical command update (>= 1).
    #[serde(default = "default_receive_multiplier")]
    pub receive_multiplier: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: FRI_DEFAULT_PORT,
            remote_host: None,
            command_mode: CommandMode::Position,
            receive_multiplier: DEFAULT_RECEIVE_MULTIPLIER,
        }
    }
}

impl ClientConfig {
    /// Validate the client settings.
    ///
    /// # Validation Rules
    /// 1. `port` != 0
    /// 2. `receive_multiplier` >= 1
    /// 3. `remote_host`, when set, is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ValidationError(
                "client.port must be non-zero".to_string(),
            ));
        }
        if self.receive_multiplier == 0 {
            return Err(ConfigError::ValidationError(
                "client.receive_multiplier must be at least 1".to_string(),
            ));
        }
        if self
            .remote_host
            .as_deref()
            .is_some_and(|h| h.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "client.remote_host cannot be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fri_conventions() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.port, 30200);
        assert_eq!(config.receive_multiplier, 1);
        assert_eq!(config.command_mode, CommandMode::Position);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn torque_mode_and_alias() {
        let a: ClientConfig = toml::from_str("command_mode = \"torque\"").unwrap();
        let b: ClientConfig = toml::from_str("command_mode = \"position_torque\"").unwrap();
        assert_eq!(a.command_mode, CommandMode::Torque);
        assert_eq!(b.command_mode, CommandMode::Torque);
    }

    #[test]
    fn zero_multiplier_rejected() {
        let config = ClientConfig {
            receive_multiplier: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("receive_multiplier")
        ));
    }

    #[test]
    fn blank_remote_host_rejected() {
        let config = ClientConfig {
            remote_host: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
