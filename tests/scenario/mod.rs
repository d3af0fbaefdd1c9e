//! Scenario tests.
//!
//! Test organization:
//! - integration.rs: The concrete default run, step by step
//! - restore.rs: Scoped restore of the working limit, including error paths
//! - events.rs: Event callbacks fired during a run
//! - idempotence.rs: Repeated runs and alternative configurations

mod idempotence;
mod integration;
