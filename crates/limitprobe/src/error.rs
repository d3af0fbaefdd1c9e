//! Error returned by a run that stopped before scenario C.

use crate::report::ScenarioReport;
use limitprobe_core::{ProbeError, SimulatedFailure};

/// A run that stopped early, together with every step logged before it
/// stopped.
///
/// The partial report never contains scenario C and is not
/// [complete](ScenarioReport::is_complete).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scenario run aborted: {error}")]
pub struct RunAborted {
    error: ProbeError,
    report: ScenarioReport,
}

impl RunAborted {
    pub(crate) fn new(error: ProbeError, report: ScenarioReport) -> Self {
        Self { error, report }
    }

    /// The error that stopped the run.
    pub fn error(&self) -> &ProbeError {
        &self.error
    }

    /// Steps logged up to the point of failure.
    pub fn report(&self) -> &ScenarioReport {
        &self.report
    }

    /// Shortcut for `self.error().simulated_failure()`.
    pub fn simulated_failure(&self) -> Option<SimulatedFailure> {
        self.error.simulated_failure()
    }

    /// Splits into the error and the partial report.
    pub fn into_parts(self) -> (ProbeError, ScenarioReport) {
        (self.error, self.report)
    }
}

impl From<RunAborted> for ProbeError {
    fn from(aborted: RunAborted) -> Self {
        aborted.error
    }
}
