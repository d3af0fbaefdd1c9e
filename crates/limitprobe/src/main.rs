//! Runs the limit probe once and prints the report.
//!
//! Run with: cargo run -p limitprobe
//! With debug logging on stderr: RUST_LOG=debug cargo run -p limitprobe

use limitprobe::SimulatorConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let simulator = match SimulatorConfig::builder().build() {
        Ok(simulator) => simulator,
        Err(err) => {
            tracing::error!(error = %err, "invalid simulator configuration");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match simulator.run().await {
        Ok(report) => {
            println!("{report}");
            if report.consistent() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(aborted) => {
            println!("{}", aborted.report());
            let (err, _) = aborted.into_parts();
            tracing::error!(error = %err, "scenario run aborted");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
