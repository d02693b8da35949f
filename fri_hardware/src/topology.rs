//! Joint interface validation.
//!
//! Every joint must declare exactly two command interfaces and two state
//! interfaces, `position` first and `effort` second, and the joint count must
//! fit into one FRI frame.

use fri_common::consts::NUMBER_OF_JOINTS;
use fri_common::hardware::info::{
    ComponentInfo, HW_IF_EFFORT, HW_IF_POSITION, HardwareInfo, InterfaceInfo,
};
use fri_common::hardware::interface::HardwareError;
use std::collections::HashSet;

const EXPECTED_LAYOUT: [&str; 2] = [HW_IF_POSITION, HW_IF_EFFORT];

/// Validate `info` and return its joint count.
///
/// # Errors
/// `HardwareError::TopologyError` naming the first offending joint.
pub fn validate_topology(info: &HardwareInfo) -> Result<usize, HardwareError> {
    if info.joints.is_empty() {
        return Err(HardwareError::TopologyError(
            "hardware declares no joints".to_string(),
        ));
    }
    if info.joints.len() > NUMBER_OF_JOINTS {
        return Err(HardwareError::TopologyError(format!(
            "{} joints declared, session carries at most {}",
            info.joints.len(),
            NUMBER_OF_JOINTS
        )));
    }

    let mut names = HashSet::with_capacity(info.joints.len());
    for joint in &info.joints {
        if !names.insert(joint.name.as_str()) {
            return Err(HardwareError::TopologyError(format!(
                "duplicate joint name '{}'",
                joint.name
            )));
        }
        validate_joint(joint)?;
    }

    Ok(info.joints.len())
}

fn validate_joint(joint: &ComponentInfo) -> Result<(), HardwareError> {
    check_layout(joint, "command", &joint.command_interfaces)?;
    check_layout(joint, "state", &joint.state_interfaces)
}

fn check_layout(
    joint: &ComponentInfo,
    kind: &str,
    interfaces: &[InterfaceInfo],
) -> Result<(), HardwareError> {
    if interfaces.len() != EXPECTED_LAYOUT.len() {
        return Err(HardwareError::TopologyError(format!(
            "joint '{}': expecting exactly {} {} interfaces, got {}",
            joint.name,
            EXPECTED_LAYOUT.len(),
            kind,
            interfaces.len()
        )));
    }

    for (slot, (declared, expected)) in interfaces.iter().zip(EXPECTED_LAYOUT).enumerate() {
        if declared.name != expected {
            let order = if slot == 0 { "first" } else { "second" };
            return Err(HardwareError::TopologyError(format!(
                "joint '{}': expecting {} {} interface as {}, got '{}'",
                joint.name,
                expected.to_uppercase(),
                kind,
                order,
                declared.name
            )));
        }
    }
    Ok(())
}
