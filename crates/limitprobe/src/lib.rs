//! Deterministic probe for a temporarily lowered concurrency limit.
//!
//! A run exercises three fixed scenarios against a [`WorkingLimit`] that
//! starts at its initial value:
//!
//! - **A**: a work item succeeds and the limit is left alone. A simulated
//!   failure here is logged and the run moves on.
//! - **B**: a work item fails, the limit is lowered, the item is retried
//!   after a short pause, and the limit is restored.
//! - **C**: the working limit is compared against the initial limit.
//!
//! The lowering in scenario B is held by a [`LimitOverride`] guard, so the
//! limit comes back on every path out of the retry, including the error path.
//! A run that stops early returns [`RunAborted`], which still carries the
//! steps logged before the failure.
//!
//! # Basic Example
//!
//! ```rust
//! use limitprobe::SimulatorConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> limitprobe_core::Result<()> {
//! let simulator = SimulatorConfig::builder()
//!     .initial_limit(3)
//!     .degraded_limit(1)
//!     .retry_delay(Duration::from_millis(100))
//!     .name("bill-processing")
//!     .build()?;
//!
//! let report = simulator.run().await?;
//! assert!(report.consistent());
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Unit of Work
//!
//! Any [`tower::Service`] over [`WorkItem`] can stand in for the built-in
//! [`ProcessWorkItem`]. The service receives a handle to the run's limit:
//!
//! ```rust
//! use limitprobe::{SimulatorConfig, WorkItem, WorkOutcome};
//! use limitprobe_core::SimulatedFailure;
//!
//! # async fn example() -> limitprobe_core::Result<()> {
//! let simulator = SimulatorConfig::builder().build()?;
//!
//! let report = simulator
//!     .run_with(|limit| {
//!         tower::service_fn(move |item: WorkItem| {
//!             let observed = limit.current();
//!             async move {
//!                 if item.is_retry {
//!                     assert_eq!(observed, 1);
//!                 }
//!                 if item.should_fail && !item.is_retry {
//!                     return Err(SimulatedFailure { id: item.id });
//!                 }
//!                 Ok(WorkOutcome { id: item.id, is_retry: item.is_retry })
//!             }
//!         })
//!     })
//!     .await?;
//! assert_eq!(report.final_limit(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Event Listeners
//!
//! ```rust
//! use limitprobe::SimulatorConfig;
//!
//! # fn example() -> limitprobe_core::Result<()> {
//! let simulator = SimulatorConfig::builder()
//!     .on_limit_lowered(|from, to| println!("limit {} -> {}", from, to))
//!     .on_limit_restored(|to| println!("limit restored to {}", to))
//!     .on_consistency_checked(|ok| println!("consistent: {}", ok))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod limit;
pub mod report;
pub mod simulator;
pub mod work;

pub use config::{SimulatorConfig, SimulatorConfigBuilder};
pub use error::RunAborted;
pub use events::SimulatorEvent;
pub use limit::{LimitOverride, WorkingLimit};
pub use report::{Scenario, ScenarioReport, StepKind, StepRecord};
pub use simulator::{run_scenario, Simulator};
pub use work::{process_work_item, ProcessWorkItem, WorkItem, WorkOutcome};
