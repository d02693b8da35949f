//! Joint topology handed to a hardware interface at initialization.
//!
//! In a ROS-style deployment this is parsed from the robot description; here
//! it is plain data, deserializable from the `[[joints]]` tables of the node
//! configuration:
//!
//! ```toml
//! [[joints]]
//! name = "joint_a1"
//! command_interfaces = ["position", "effort"]
//! state_interfaces = ["position", "effort"]
//! ```

use crate::consts::NUMBER_OF_JOINTS;
use serde::{Deserialize, Serialize};

/// Interface name for joint positions.
pub const HW_IF_POSITION: &str = "position";

/// Interface name for joint efforts (torques for revolute joints).
pub const HW_IF_EFFORT: &str = "effort";

/// A single declared interface of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceInfo {
    /// Interface name, e.g. `"position"`.
    pub name: String,
}

impl InterfaceInfo {
    /// Create an interface entry.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A joint and the interfaces it declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Joint name (unique within the hardware).
    pub name: String,
    /// Declared command interfaces.
    #[serde(default)]
    pub command_interfaces: Vec<InterfaceInfo>,
    /// Declared state interfaces.
    #[serde(default)]
    pub state_interfaces: Vec<InterfaceInfo>,
}

impl ComponentInfo {
    /// Joint with `[position, effort]` command and state interfaces.
    pub fn position_effort(name: &str) -> Self {
        Self {
            name: name.to_string(),
            command_interfaces: vec![
                InterfaceInfo::new(HW_IF_POSITION),
                InterfaceInfo::new(HW_IF_EFFORT),
            ],
            state_interfaces: vec![
                InterfaceInfo::new(HW_IF_POSITION),
                InterfaceInfo::new(HW_IF_EFFORT),
            ],
        }
    }
}

/// Hardware description: a name and its ordered joints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HardwareInfo {
    /// Hardware component name.
    #[serde(default)]
    pub name: String,
    /// Ordered joints.
    #[serde(default)]
    pub joints: Vec<ComponentInfo>,
}

impl HardwareInfo {
    /// Seven-axis LBR arm with joints `joint_a1` .. `joint_a7`.
    pub fn lbr_arm(name: &str) -> Self {
        Self {
            name: name.to_string(),
            joints: (1..=NUMBER_OF_JOINTS)
                .map(|i| ComponentInfo::position_effort(&format!("joint_a{i}")))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lbr_arm_has_seven_position_effort_joints() {
        let info = HardwareInfo::lbr_arm("lbr");
        assert_eq!(info.joints.len(), NUMBER_OF_JOINTS);
        assert_eq!(info.joints[0].name, "joint_a1");
        assert_eq!(info.joints[6].name, "joint_a7");
        assert_eq!(info.joints[3].command_interfaces[1].name, HW_IF_EFFORT);
    }

    #[test]
    fn joints_deserialize_from_plain_strings() {
        #[derive(Deserialize)]
        struct Wrapper {
            joints: Vec<ComponentInfo>,
        }

        let w: Wrapper = toml::from_str(
            r#"
[[joints]]
name = "joint_a1"
command_interfaces = ["position", "effort"]
state_interfaces = ["position"]
"#,
        )
        .unwrap();

        assert_eq!(w.joints[0].command_interfaces.len(), 2);
        assert_eq!(w.joints[0].state_interfaces, vec![InterfaceInfo::new("position")]);
    }
}
