//! VEF stress report: run every stress experiment with default settings
//! and print a summary.
//!
//! Demonstrates:
//!   1. Installing a `tracing` subscriber (library crates only emit events)
//!   2. Running the combined stress suite via `run_all_tests`
//!   3. Reading drift, contrast and FLOP estimates out of the report
//!
//! Run with:
//!   cargo run --example stress_report
//!
//! Set `RUST_LOG=vef_engine=debug` for per-step energies.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vef_engine::{run_all_tests, StressConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vef_engine=info,vef_arena=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let report = run_all_tests(&StressConfig::default())?;

    println!(
        "Conservation relative drift: {}",
        report.conservation.relative_drift
    );
    println!(
        "Final contrast: {}",
        report.perturbation_growth.final_contrast
    );

    println!("Parameter sensitivity (max energy deviation):");
    for (label, run) in &report.parameter_sensitivity {
        println!("  {label} -> {:.6e}", run.max_energy_deviation);
    }

    println!("Scaling estimates:");
    for (size, estimate) in &report.scaling_estimate {
        println!("  {size} -> approx_GFLOPs: {}", estimate.approx_gflops);
    }
    Ok(())
}
