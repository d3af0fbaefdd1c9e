//! The simulated unit of work.

use futures::future::{ready, Ready};
use limitprobe_core::SimulatedFailure;
use std::fmt;
use std::task::{Context, Poll};
use tower::Service;

/// One simulated unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    /// Identifier carried into the outcome or the failure.
    pub id: i64,
    /// Fail this invocation unless it is a retry.
    pub should_fail: bool,
    /// This invocation is itself a retry attempt.
    pub is_retry: bool,
}

impl WorkItem {
    /// A work item that succeeds on its first attempt.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            should_fail: false,
            is_retry: false,
        }
    }

    /// Marks the item as one that fails unless retried.
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Marks the item as a retry attempt.
    pub fn retry(mut self) -> Self {
        self.is_retry = true;
        self
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "work item {} (retry: {})", self.id, self.is_retry)
    }
}

/// Successful result of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkOutcome {
    pub id: i64,
    pub is_retry: bool,
}

/// Runs a work item.
///
/// Fails with [`SimulatedFailure`] exactly when `should_fail` is set and the
/// item is not a retry.
pub async fn process_work_item(item: WorkItem) -> Result<WorkOutcome, SimulatedFailure> {
    evaluate(item)
}

fn evaluate(item: WorkItem) -> Result<WorkOutcome, SimulatedFailure> {
    #[cfg(feature = "tracing")]
    tracing::debug!(id = item.id, is_retry = item.is_retry, "processing work item");

    if item.should_fail && !item.is_retry {
        return Err(SimulatedFailure { id: item.id });
    }

    Ok(WorkOutcome {
        id: item.id,
        is_retry: item.is_retry,
    })
}

/// [`Service`] form of [`process_work_item`], used by the scenario runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessWorkItem;

impl ProcessWorkItem {
    pub fn new() -> Self {
        Self
    }
}

impl Service<WorkItem> for ProcessWorkItem {
    type Response = WorkOutcome;
    type Error = SimulatedFailure;
    type Future = Ready<Result<WorkOutcome, SimulatedFailure>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, item: WorkItem) -> Self::Future {
        ready(evaluate(item))
    }
}
