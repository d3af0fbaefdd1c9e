//! Core infrastructure for limitprobe.
//!
//! This crate provides the pieces shared by the simulator and its tests:
//! - Event system for observing limit changes and work item calls
//! - Error types for simulated failures and configuration problems

pub mod error;
pub mod events;

pub use error::{ProbeError, Result, SimulatedFailure};
pub use events::{EventListener, ProbeEvent};
