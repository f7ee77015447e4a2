#![warn(missing_docs)]
//! Sigbench CLI Library
//!
//! Sequential benchmark orchestration for zkVM signature-aggregation
//! workloads: probe the hardware, select an environment configuration for
//! the requested backend and device mode, build guest then host, run the
//! measurement harness, filter its output, and report where the results
//! landed.
//!
//! There is no flag parsing. Each (backend, device-mode, policy) combination
//! is its own binary, and every binary funnels into [`run`]:
//!
//! ```ignore
//! use sigbench_core::{Backend, DeviceMode, Policy};
//!
//! fn main() -> anyhow::Result<()> {
//!     sigbench_cli::run(Backend::Sp1, DeviceMode::Cuda, Policy::Strict)
//! }
//! ```

mod bench;
mod build;
mod probe;
mod process;
mod report;

pub use bench::{BenchmarkRunner, SAMPLE_SIZE, WORKLOAD_DEFAULTS};
pub use build::BuildPipeline;
pub use probe::{GpuProbe, NvidiaSmiProbe, GPU_QUERY_PROGRAM};
pub use process::{CommandOutput, CommandSpec, ProcessRunner, SystemRunner};
pub use report::{print_report, write_summary, RunReport, REPORT_PATH, SUMMARY_PATH};

use chrono::Utc;
use sigbench_core::{filter_output, select_config, Backend, DeviceMode, HarnessError, Policy};

/// The sequential benchmark pipeline.
///
/// Owns nothing but a subprocess runner; each [`Harness::execute`] call is
/// independent and leaves no state behind apart from the overwritten report
/// artifacts.
pub struct Harness<'r> {
    runner: &'r dyn ProcessRunner,
}

impl<'r> Harness<'r> {
    /// Create a pipeline that spawns subprocesses through `runner`.
    pub fn new(runner: &'r dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run the full pipeline: probe → select → build → bench → filter.
    ///
    /// Every stage blocks until its subprocess finishes; the first fatal
    /// error aborts the run with nothing retried.
    pub fn execute(
        &self,
        backend: Backend,
        requested: DeviceMode,
        policy: Policy,
    ) -> Result<RunReport, HarnessError> {
        let profile = backend.profile();

        let capability = NvidiaSmiProbe::new(self.runner).probe();
        match capability.descriptor.as_deref() {
            Some(name) => tracing::info!(gpu = name, "accelerator detected"),
            None if capability.present => tracing::info!("accelerator detected (unnamed)"),
            None => tracing::info!("no accelerator detected"),
        }

        let config = select_config(profile, requested, policy, &capability)?;
        tracing::info!(
            backend = %backend,
            requested = %requested,
            effective = %config.device_mode,
            "configuration selected"
        );

        let artifacts = BuildPipeline::new(self.runner).build(profile, &config)?;
        let raw_output = BenchmarkRunner::new(self.runner).run(&artifacts, profile, &config)?;
        let filtered_output = filter_output(&raw_output, &config);

        Ok(RunReport {
            backend,
            device_mode: config.device_mode,
            downgraded: config.downgraded,
            timestamp: Utc::now(),
            report_path: REPORT_PATH.to_string(),
            raw_output,
            filtered_output,
        })
    }
}

/// Entry point shared by all sigbench binaries.
///
/// Completed runs (including CPU-downgraded ones) exit 0. Strict-policy
/// hardware absence exits 1 before any build or benchmark subprocess is
/// spawned; build and benchmark failures exit with the child's own code.
pub fn run(backend: Backend, requested: DeviceMode, policy: Policy) -> anyhow::Result<()> {
    init_logging();

    let runner = SystemRunner;
    match Harness::new(&runner).execute(backend, requested, policy) {
        Ok(report) => {
            print_report(&report);
            if let Err(e) = write_summary(&report) {
                tracing::warn!(error = %e, "failed to write run summary");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigbench=info")),
        )
        .init();
}
