//! FRI Common Library
//!
//! Shared types for the FRI hardware interface workspace: the hardware
//! interface contract consumed by a motion-control framework, the FRI session
//! transport boundary, and configuration loading.
//!
//! # Module Structure
//!
//! - [`consts`] - System-wide constants (joint capacity, port, periods)
//! - [`config`] - Configuration loading traits and types
//! - [`hardware`] - `SystemInterface` trait, joint topology, descriptors, errors
//! - [`fri`] - `FriSession` transport trait, robot state and command records
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use fri_common::prelude::*;
//!
//! let info = HardwareInfo::lbr_arm("lbr");
//! assert_eq!(info.joints.len(), NUMBER_OF_JOINTS);
//! ```

pub mod config;
pub mod consts;
pub mod fri;
pub mod hardware;
pub mod prelude;
