//! Property tests for the scenario run.
//!
//! Invariants tested:
//! - Every run ends with the working limit at its initial value
//! - The limit is at the degraded value exactly while the retry runs
//! - Runs are deterministic for a given configuration

use limitprobe::{Scenario, SimulatorConfig, StepKind, WorkItem, WorkOutcome};
use limitprobe_core::SimulatedFailure;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

fn paused_runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

fn limits() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=64).prop_flat_map(|initial| (Just(initial), 1usize..=initial))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: the final limit always equals the initial limit
    #[test]
    fn run_always_ends_restored(
        (initial, degraded) in limits(),
        delay_ms in 0u64..=500,
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let simulator = SimulatorConfig::builder()
                .initial_limit(initial)
                .degraded_limit(degraded)
                .retry_delay(Duration::from_millis(delay_ms))
                .build()
                .unwrap();

            let report = simulator.run().await.unwrap();
            prop_assert_eq!(report.initial_limit(), initial);
            prop_assert_eq!(report.final_limit(), initial);
            prop_assert!(report.consistent());
            prop_assert_eq!(report.steps().len(), 9);
            Ok(())
        })?;
    }

    /// Property: only the retry call runs under the degraded limit
    #[test]
    fn degraded_limit_only_seen_by_retry(
        (initial, degraded) in limits(),
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let s = Arc::clone(&seen);

            let simulator = SimulatorConfig::builder()
                .initial_limit(initial)
                .degraded_limit(degraded)
                .build()
                .unwrap();

            simulator
                .run_with(move |limit| {
                    tower::service_fn(move |item: WorkItem| {
                        s.lock().unwrap().push((item.is_retry, limit.current()));
                        async move {
                            if item.should_fail && !item.is_retry {
                                Err(SimulatedFailure { id: item.id })
                            } else {
                                Ok(WorkOutcome { id: item.id, is_retry: item.is_retry })
                            }
                        }
                    })
                })
                .await
                .unwrap();

            let seen = seen.lock().unwrap();
            prop_assert_eq!(
                seen.as_slice(),
                &[(false, initial), (false, initial), (true, degraded)]
            );
            Ok(())
        })?;
    }

    /// Property: two runs of the same simulator produce identical reports
    #[test]
    fn runs_are_deterministic(
        (initial, degraded) in limits(),
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let simulator = SimulatorConfig::builder()
                .initial_limit(initial)
                .degraded_limit(degraded)
                .build()
                .unwrap();

            let first = simulator.run().await.unwrap();
            let second = simulator.run().await.unwrap();
            prop_assert_eq!(&first, &second);

            let lowered: Vec<_> = first
                .steps_for(Scenario::B)
                .filter(|s| s.kind == StepKind::LimitLowered)
                .map(|s| s.working_limit)
                .collect();
            prop_assert_eq!(lowered, vec![degraded]);
            Ok(())
        })?;
    }
}
