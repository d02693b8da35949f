//! Hardware interface contract.
//!
//! This module contains the capability-set trait a motion-control framework
//! binds to, the joint topology it is initialized with, the descriptors it
//! exports, and the adapter configuration types.

pub mod config;
pub mod descriptor;
pub mod info;
pub mod interface;
