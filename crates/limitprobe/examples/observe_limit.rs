use limitprobe::{SimulatorConfig, WorkItem, WorkOutcome};
use limitprobe_core::SimulatedFailure;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("Observing the working limit from inside the unit of work\n");

    let simulator = SimulatorConfig::builder()
        .name("observer")
        .initial_limit(8)
        .degraded_limit(2)
        .retry_delay(Duration::from_millis(20))
        .on_limit_lowered(|from, to| println!("[event] limit lowered {} -> {}", from, to))
        .on_limit_restored(|to| println!("[event] limit restored to {}", to))
        .build()
        .expect("valid configuration");

    let report = simulator
        .run_with(|limit| {
            tower::service_fn(move |item: WorkItem| {
                println!("[service] {} under limit {}", item, limit.current());
                async move {
                    if item.should_fail && !item.is_retry {
                        Err(SimulatedFailure { id: item.id })
                    } else {
                        Ok(WorkOutcome {
                            id: item.id,
                            is_retry: item.is_retry,
                        })
                    }
                }
            })
        })
        .await
        .expect("scenario run");

    println!("\n{}", report);
}
