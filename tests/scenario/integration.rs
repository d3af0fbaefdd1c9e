//! The default run, step by step.

use super::support::{CallLog, observing_service};
use limitprobe::{Scenario, SimulatorConfig, StepKind, WorkItem, run_scenario};
use limitprobe_core::SimulatedFailure;
use std::sync::{Arc, Mutex};

#[tokio::test(start_paused = true)]
async fn default_run_ends_restored() {
    let report = run_scenario().await.unwrap();

    assert_eq!(report.initial_limit(), 3);
    assert_eq!(report.final_limit(), 3);
    assert!(report.consistent());
}

#[tokio::test(start_paused = true)]
async fn scenario_a_keeps_the_limit() {
    let report = run_scenario().await.unwrap();

    let steps: Vec<_> = report.steps_for(Scenario::A).collect();
    assert_eq!(steps.len(), 2);
    assert_eq!(
        steps[0].kind,
        StepKind::Processing {
            id: 1,
            is_retry: false
        }
    );
    assert_eq!(steps[1].kind, StepKind::Succeeded { id: 1 });
    assert!(steps.iter().all(|s| s.working_limit == 3));
}

#[tokio::test(start_paused = true)]
async fn scenario_b_lowers_retries_and_restores() {
    let report = run_scenario().await.unwrap();

    let steps: Vec<_> = report
        .steps_for(Scenario::B)
        .map(|s| (s.kind, s.working_limit))
        .collect();

    assert_eq!(
        steps,
        vec![
            (
                StepKind::Processing {
                    id: 2,
                    is_retry: false
                },
                3
            ),
            (StepKind::FailureDetected(SimulatedFailure { id: 2 }), 3),
            (StepKind::LimitLowered, 1),
            (
                StepKind::Processing {
                    id: 2,
                    is_retry: true
                },
                1
            ),
            (StepKind::LimitRestored, 3),
            (StepKind::RetrySucceeded { id: 2 }, 3),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn scenario_c_reports_match() {
    let report = run_scenario().await.unwrap();

    let steps: Vec<_> = report.steps_for(Scenario::C).collect();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::ConsistencyChecked { matches: true });
    assert_eq!(steps[0].working_limit, 3);
}

#[tokio::test(start_paused = true)]
async fn service_sees_degraded_limit_only_during_retry() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let l = Arc::clone(&log);

    let simulator = SimulatorConfig::builder().build().unwrap();
    simulator
        .run_with(move |limit| observing_service(limit, l))
        .await
        .unwrap();

    let calls: Vec<_> = log
        .lock()
        .unwrap()
        .iter()
        .map(|c| (c.item, c.working_limit))
        .collect();

    assert_eq!(
        calls,
        vec![
            (WorkItem::new(1), 3),
            (WorkItem::new(2).failing(), 3),
            (WorkItem::new(2).failing().retry(), 1),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn rendered_report_walks_through_all_scenarios() {
    let text = run_scenario().await.unwrap().to_string();

    let expected = [
        "Initial working limit: 3",
        "Initial value saved as: 3",
        "Scenario A: normal processing (no error)",
        "  Processing work item 1 (retry: false)...",
        "  ✅ Success, working limit still: 3",
        "Scenario B: error on first attempt, then successful retry",
        "  Processing work item 2 (retry: false)...",
        "  ⚠️ Error detected: simulated failure for work item 2",
        "  ⚙️ Working limit temporarily set to: 1",
        "  Processing work item 2 (retry: true)...",
        "  ⚙️ Working limit restored to: 3",
        "  ✅ Retry successful",
        "Scenario C: verify the working limit is restored",
        "  Current working limit: 3",
        "  Expected (initial): 3",
        "  Match: ✅ YES",
        "=== All scenarios completed ===",
    ];

    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    let mut cursor = lines.iter();
    for line in expected {
        assert!(
            cursor.any(|l| *l == line),
            "missing or out of order: {:?}\n{}",
            line,
            text
        );
    }
}
