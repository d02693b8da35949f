//! Interface descriptors exported to the framework.
//!
//! A descriptor names one exported value slot as `prefix/interface`
//! (e.g. `joint_a1/position`, `state/fri_state`). The position of a
//! descriptor in the exported list is the index used for value access.

use std::fmt;

/// Name of one exported value slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceDescriptor {
    /// Owning component (joint name or scalar group).
    pub prefix_name: String,
    /// Interface name within the component.
    pub interface_name: String,
}

impl InterfaceDescriptor {
    /// Create a descriptor.
    pub fn new(prefix_name: &str, interface_name: &str) -> Self {
        Self {
            prefix_name: prefix_name.to_string(),
            interface_name: interface_name.to_string(),
        }
    }

    /// `prefix/interface`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.prefix_name, self.interface_name)
    }
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.prefix_name, self.interface_name)
    }
}

/// Index of `prefix/interface` in an exported descriptor list.
pub fn find_descriptor(
    descriptors: &[InterfaceDescriptor],
    prefix_name: &str,
    interface_name: &str,
) -> Option<usize> {
    descriptors
        .iter()
        .position(|d| d.prefix_name == prefix_name && d.interface_name == interface_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_and_lookup() {
        let descs = vec![
            InterfaceDescriptor::new("state", "fri_state"),
            InterfaceDescriptor::new("joint_a1", "position"),
        ];
        assert_eq!(descs[1].full_name(), "joint_a1/position");
        assert_eq!(descs[0].to_string(), "state/fri_state");
        assert_eq!(find_descriptor(&descs, "joint_a1", "position"), Some(1));
        assert_eq!(find_descriptor(&descs, "joint_a1", "effort"), None);
    }
}
