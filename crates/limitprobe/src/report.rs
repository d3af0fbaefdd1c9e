//! Structured record of a scenario run and its human-readable rendering.

use limitprobe_core::SimulatedFailure;
use std::fmt;

/// The three fixed scenarios of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Normal processing, no error.
    A,
    /// Error on the first attempt, then a retry under a lowered limit.
    B,
    /// Working limit compared against the initial limit.
    C,
}

impl Scenario {
    fn title(self) -> &'static str {
        match self {
            Scenario::A => "Scenario A: normal processing (no error)",
            Scenario::B => "Scenario B: error on first attempt, then successful retry",
            Scenario::C => "Scenario C: verify the working limit is restored",
        }
    }
}

/// What happened at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A work item call was started.
    Processing { id: i64, is_retry: bool },
    /// Scenario A's call succeeded.
    Succeeded { id: i64 },
    /// Scenario A's call failed. The run carries on with scenario B.
    Failed(SimulatedFailure),
    /// Scenario B's first call failed as instructed.
    FailureDetected(SimulatedFailure),
    /// Scenario B's first call did not fail, so nothing was retried.
    FailureNotRaised { id: i64 },
    /// The working limit was lowered for the retry.
    LimitLowered,
    /// The working limit went back to the initial value.
    LimitRestored,
    /// The retry succeeded.
    RetrySucceeded { id: i64 },
    /// Scenario C's comparison.
    ConsistencyChecked { matches: bool },
}

/// One logged step with the working limit observed at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    pub scenario: Scenario,
    pub kind: StepKind,
    pub working_limit: usize,
}

/// Everything a run logged, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub(crate) name: String,
    pub(crate) initial_limit: usize,
    pub(crate) final_limit: usize,
    pub(crate) steps: Vec<StepRecord>,
    pub(crate) completed: bool,
}

impl ScenarioReport {
    pub(crate) fn new(name: impl Into<String>, initial_limit: usize) -> Self {
        Self {
            name: name.into(),
            initial_limit,
            final_limit: initial_limit,
            steps: Vec::new(),
            completed: false,
        }
    }

    pub(crate) fn record(&mut self, scenario: Scenario, kind: StepKind, working_limit: usize) {
        self.steps.push(StepRecord {
            scenario,
            kind,
            working_limit,
        });
    }

    pub(crate) fn complete(&mut self, final_limit: usize) {
        self.final_limit = final_limit;
        self.completed = true;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_limit(&self) -> usize {
        self.initial_limit
    }

    /// Working limit at the end of the run.
    pub fn final_limit(&self) -> usize {
        self.final_limit
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Steps belonging to one scenario.
    pub fn steps_for(&self, scenario: Scenario) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(move |s| s.scenario == scenario)
    }

    /// Returns `true` once scenario C has run. A report taken from
    /// [`RunAborted`](crate::RunAborted) is partial.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Returns `true` when the run ended with the working limit back at its
    /// initial value.
    pub fn consistent(&self) -> bool {
        self.final_limit == self.initial_limit
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Concurrency limit probe: {} ===", self.name)?;
        writeln!(f)?;
        writeln!(f, "Initial working limit: {}", self.initial_limit)?;
        writeln!(f, "Initial value saved as: {}", self.initial_limit)?;

        let mut current = None;
        for step in &self.steps {
            if current != Some(step.scenario) {
                writeln!(f)?;
                writeln!(f, "{}", step.scenario.title())?;
                current = Some(step.scenario);
            }
            let limit = step.working_limit;
            match step.kind {
                StepKind::Processing { id, is_retry } => {
                    writeln!(f, "  Processing work item {id} (retry: {is_retry})...")?
                }
                StepKind::Succeeded { .. } => {
                    writeln!(f, "  ✅ Success, working limit still: {limit}")?
                }
                StepKind::Failed(failure) => writeln!(f, "  ❌ Error: {failure}")?,
                StepKind::FailureDetected(failure) => {
                    writeln!(f, "  ⚠️ Error detected: {failure}")?
                }
                StepKind::FailureNotRaised { id } => writeln!(
                    f,
                    "  ❌ Work item {id} did not fail, nothing to retry (working limit: {limit})"
                )?,
                StepKind::LimitLowered => {
                    writeln!(f, "  ⚙️ Working limit temporarily set to: {limit}")?
                }
                StepKind::LimitRestored => writeln!(f, "  ⚙️ Working limit restored to: {limit}")?,
                StepKind::RetrySucceeded { .. } => writeln!(f, "  ✅ Retry successful")?,
                StepKind::ConsistencyChecked { matches } => {
                    writeln!(f, "  Current working limit: {limit}")?;
                    writeln!(f, "  Expected (initial): {}", self.initial_limit)?;
                    let verdict = if matches { "✅ YES" } else { "❌ NO" };
                    writeln!(f, "  Match: {verdict}")?;
                }
            }
        }

        if self.completed {
            writeln!(f)?;
            write!(f, "=== All scenarios completed ===")?;
        }
        Ok(())
    }
}
