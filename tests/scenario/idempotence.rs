//! Repeated runs and alternative configurations.

use limitprobe::{Scenario, SimulatorConfig, StepKind, run_scenario};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn repeated_runs_always_end_at_initial() {
    for _ in 0..5 {
        let report = run_scenario().await.unwrap();
        assert_eq!(report.final_limit(), 3);
        assert!(report.consistent());
    }
}

#[tokio::test(start_paused = true)]
async fn one_simulator_reused_produces_identical_reports() {
    let simulator = SimulatorConfig::builder().build().unwrap();

    let first = simulator.run().await.unwrap();
    let second = simulator.run().await.unwrap();
    let third = simulator.run().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test(start_paused = true)]
async fn custom_limits_follow_the_same_shape() {
    let simulator = SimulatorConfig::builder()
        .initial_limit(10)
        .degraded_limit(4)
        .retry_delay(Duration::from_millis(1))
        .build()
        .unwrap();

    let report = simulator.run().await.unwrap();

    let lowered: Vec<_> = report
        .steps_for(Scenario::B)
        .filter(|s| s.kind == StepKind::LimitLowered)
        .map(|s| s.working_limit)
        .collect();
    assert_eq!(lowered, vec![4]);
    assert_eq!(report.initial_limit(), 10);
    assert_eq!(report.final_limit(), 10);
}

#[tokio::test(start_paused = true)]
async fn zero_delay_still_restores() {
    let simulator = SimulatorConfig::builder()
        .retry_delay(Duration::ZERO)
        .build()
        .unwrap();

    assert!(simulator.run().await.unwrap().consistent());
}

#[tokio::test(flavor = "multi_thread")]
async fn run_future_is_spawnable() {
    let handle = tokio::spawn(async {
        let simulator = SimulatorConfig::builder()
            .retry_delay(Duration::from_millis(5))
            .build()
            .unwrap();
        simulator.run().await
    });

    let report = handle.await.unwrap().unwrap();
    assert!(report.consistent());
}
