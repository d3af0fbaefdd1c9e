//! Scenario runner.

use crate::config::SimulatorConfig;
use crate::events::SimulatorEvent;
use crate::limit::WorkingLimit;
use crate::report::{Scenario, ScenarioReport, StepKind};
use crate::work::{ProcessWorkItem, WorkItem, WorkOutcome};
use crate::error::RunAborted;
use limitprobe_core::ProbeError;
use std::time::Instant;
use tower::{Service, ServiceExt};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_gauge};
#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// Runs the fixed A/B/C scenario against a fresh working limit.
///
/// Every run starts from a new [`WorkingLimit`], so no state carries over
/// between runs of the same simulator.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    pub(crate) fn new(config: SimulatorConfig) -> Self {
        #[cfg(feature = "metrics")]
        {
            METRICS_INIT.call_once(|| {
                describe_gauge!(
                    "limitprobe_working_limit",
                    "Current value of the simulated concurrency limit"
                );
                describe_counter!(
                    "limitprobe_work_items_total",
                    "Total number of work item calls by result"
                );
                describe_counter!(
                    "limitprobe_limit_overrides_total",
                    "Total number of times the working limit was lowered"
                );
            });
        }
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs the scenario with [`ProcessWorkItem`] as the unit of work.
    pub async fn run(&self) -> Result<ScenarioReport, RunAborted> {
        self.run_with(|_| ProcessWorkItem::new()).await
    }

    /// Runs the scenario with a caller-supplied unit of work.
    ///
    /// `make_service` receives a handle to the run's working limit so the
    /// service can observe the value it is called under. An error that no
    /// scenario step handles stops the run; the returned [`RunAborted`]
    /// carries the steps logged up to that point.
    pub async fn run_with<F, S>(&self, make_service: F) -> Result<ScenarioReport, RunAborted>
    where
        F: FnOnce(WorkingLimit) -> S,
        S: Service<WorkItem, Response = WorkOutcome>,
        S::Error: Into<ProbeError>,
    {
        let config = &self.config;
        let mut limit = WorkingLimit::with_listeners(
            config.name.clone(),
            config.initial_limit,
            config.event_listeners.clone(),
        );
        let mut service = make_service(limit.clone());
        let mut report = ScenarioReport::new(config.name.clone(), limit.initial());

        #[cfg(feature = "tracing")]
        tracing::info!(
            simulator = %config.name,
            initial_limit = limit.initial(),
            "starting scenario run"
        );

        match self.drive(&mut service, &mut limit, &mut report).await {
            Ok(()) => Ok(report),
            Err(error) => {
                report.final_limit = limit.current();

                #[cfg(feature = "tracing")]
                tracing::warn!(
                    simulator = %config.name,
                    steps = report.steps().len(),
                    error = %error,
                    "scenario run aborted"
                );

                Err(RunAborted::new(error, report))
            }
        }
    }

    async fn drive<S>(
        &self,
        service: &mut S,
        limit: &mut WorkingLimit,
        report: &mut ScenarioReport,
    ) -> limitprobe_core::Result<()>
    where
        S: Service<WorkItem, Response = WorkOutcome>,
        S::Error: Into<ProbeError>,
    {
        let config = &self.config;

        // Scenario A: a plain success leaves the limit alone.
        let item = WorkItem::new(1);
        report.record(Scenario::A, processing(item), limit.current());
        match self.call(service, item).await {
            Ok(outcome) => report.record(
                Scenario::A,
                StepKind::Succeeded { id: outcome.id },
                limit.current(),
            ),
            Err(err) => {
                let Some(failure) = err.simulated_failure() else {
                    return Err(err);
                };
                report.record(Scenario::A, StepKind::Failed(failure), limit.current());
            }
        }

        // Scenario B: fail, lower, wait, retry, restore.
        let item = WorkItem::new(2).failing();
        report.record(Scenario::B, processing(item), limit.current());
        match self.call(service, item).await {
            Ok(outcome) => {
                report.record(
                    Scenario::B,
                    StepKind::FailureNotRaised { id: outcome.id },
                    limit.current(),
                );
            }
            Err(err) => {
                let Some(failure) = err.simulated_failure() else {
                    return Err(err);
                };
                report.record(
                    Scenario::B,
                    StepKind::FailureDetected(failure),
                    limit.current(),
                );

                let lowered = limit.lower_to(config.degraded_limit);
                report.record(Scenario::B, StepKind::LimitLowered, lowered.current());

                tokio::time::sleep(config.retry_delay).await;

                let retry = item.retry();
                report.record(Scenario::B, processing(retry), lowered.current());
                let outcome = self.call(service, retry).await?;

                let restored = lowered.restore();
                report.record(Scenario::B, StepKind::LimitRestored, restored);
                report.record(
                    Scenario::B,
                    StepKind::RetrySucceeded { id: outcome.id },
                    restored,
                );
            }
        }

        // Scenario C: the working limit must be back where it started.
        let working = limit.current();
        let matches = limit.is_restored();
        config
            .event_listeners
            .emit(&SimulatorEvent::ConsistencyChecked {
                simulator_name: config.name.clone(),
                timestamp: Instant::now(),
                working,
                initial: limit.initial(),
            });
        report.record(
            Scenario::C,
            StepKind::ConsistencyChecked { matches },
            working,
        );
        report.complete(working);

        #[cfg(feature = "tracing")]
        {
            if matches {
                tracing::info!(simulator = %config.name, working, "scenario run completed");
            } else {
                tracing::warn!(
                    simulator = %config.name,
                    working,
                    initial = limit.initial(),
                    "working limit was not restored"
                );
            }
        }

        Ok(())
    }

    async fn call<S>(&self, service: &mut S, item: WorkItem) -> limitprobe_core::Result<WorkOutcome>
    where
        S: Service<WorkItem, Response = WorkOutcome>,
        S::Error: Into<ProbeError>,
    {
        let result: limitprobe_core::Result<WorkOutcome> = match service.ready().await {
            Ok(ready) => ready.call(item).await.map_err(Into::into),
            Err(err) => Err(err.into()),
        };

        let name = &self.config.name;
        match &result {
            Ok(outcome) => {
                self.config
                    .event_listeners
                    .emit(&SimulatorEvent::ItemProcessed {
                        simulator_name: name.clone(),
                        timestamp: Instant::now(),
                        id: outcome.id,
                        is_retry: outcome.is_retry,
                    });

                #[cfg(feature = "metrics")]
                counter!("limitprobe_work_items_total", "simulator" => name.clone(), "result" => "success")
                    .increment(1);
            }
            Err(_err) => {
                self.config
                    .event_listeners
                    .emit(&SimulatorEvent::ItemFailed {
                        simulator_name: name.clone(),
                        timestamp: Instant::now(),
                        id: item.id,
                    });

                #[cfg(feature = "tracing")]
                tracing::debug!(simulator = %name, id = item.id, error = %_err, "work item failed");

                #[cfg(feature = "metrics")]
                counter!("limitprobe_work_items_total", "simulator" => name.clone(), "result" => "failure")
                    .increment(1);
            }
        }

        result
    }
}

fn processing(item: WorkItem) -> StepKind {
    StepKind::Processing {
        id: item.id,
        is_retry: item.is_retry,
    }
}

/// Runs the scenario once with the default configuration.
pub async fn run_scenario() -> Result<ScenarioReport, RunAborted> {
    Simulator::new(SimulatorConfig::default()).run().await
}
