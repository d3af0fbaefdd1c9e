//! Simulator metrics regression tests

use super::helpers::*;
use limitprobe::{SimulatorConfig, WorkingLimit};
use serial_test::serial;
use std::time::Duration;

#[tokio::test(start_paused = true)]
#[serial]
async fn scenario_run_metrics_exist() {
    init_recorder();

    let simulator = SimulatorConfig::builder()
        .name("metrics_run")
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();

    simulator.run().await.unwrap();

    assert_gauge_exists("limitprobe_working_limit");
    assert_metric_has_label("limitprobe_working_limit", "simulator", "metrics_run");

    assert_counter_exists("limitprobe_work_items_total");
    assert_metric_has_label("limitprobe_work_items_total", "simulator", "metrics_run");
    assert_metric_has_label("limitprobe_work_items_total", "result", "success");
    assert_metric_has_label("limitprobe_work_items_total", "result", "failure");

    assert_counter_exists("limitprobe_limit_overrides_total");
    assert_metric_has_label("limitprobe_limit_overrides_total", "simulator", "metrics_run");
}

#[test]
#[serial]
fn standalone_limit_override_metrics() {
    init_recorder();

    let mut limit = WorkingLimit::new(3);
    limit.lower_to(1).restore();

    assert_counter_exists("limitprobe_limit_overrides_total");
    assert_metric_has_label("limitprobe_limit_overrides_total", "simulator", "limit");
}
