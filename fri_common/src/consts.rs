//! System-wide constants for the FRI workspace.
//!
//! Single source of truth for joint capacity, the FRI port and cycle periods.

use static_assertions::const_assert;

/// Number of joints carried by every FRI frame (LBR arm).
pub const NUMBER_OF_JOINTS: usize = 7;

/// Well-known UDP port the robot controller's FRI session connects to.
pub const FRI_DEFAULT_PORT: u16 = 30200;

/// Default number of physical cycles per logical command update.
pub const DEFAULT_RECEIVE_MULTIPLIER: u32 = 1;

/// Default control cycle time in microseconds (FRI send period of 5 ms).
pub const DEFAULT_CYCLE_TIME_US: u32 = 5000;

/// Backoff applied by the control loop when the hardware is not active.
pub const NOT_ACTIVE_BACKOFF_MS: u64 = 50;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fri/control_node.toml";

/// Prefix of the scalar session-state descriptor.
pub const SESSION_STATE_PREFIX: &str = "state";

/// Interface name of the scalar session-state descriptor.
pub const SESSION_STATE_INTERFACE: &str = "fri_state";

/// Prefix of the throttle parameter slot.
pub const TIMING_PREFIX: &str = "timing";

/// Name of the throttle parameter slot.
pub const RECEIVE_MULTIPLIER_PARAMETER: &str = "receive_multiplier";

const_assert!(NUMBER_OF_JOINTS > 0);
const_assert!(DEFAULT_RECEIVE_MULTIPLIER >= 1);
const_assert!(DEFAULT_CYCLE_TIME_US > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert_eq!(NUMBER_OF_JOINTS, 7);
        assert_eq!(FRI_DEFAULT_PORT, 30200);
        assert!(NOT_ACTIVE_BACKOFF_MS < 1000);
    }
}
