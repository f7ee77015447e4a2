//! Result Reporting
//!
//! Final stage of the pipeline: print the location of the generated report
//! artifact, warn loudly when a CUDA request was downgraded to CPU, and drop
//! a small JSON run summary next to the measurement harness's own output.
//! Both artifacts live at fixed relative paths and are overwritten on every
//! run; the harness keeps no state between invocations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sigbench_core::{Backend, DeviceMode};
use std::fs;
use std::io;
use std::path::Path;

/// Fixed relative path of the report the measurement harness generates.
pub const REPORT_PATH: &str = "target/criterion/report/index.html";

/// Fixed relative path of the JSON run summary this tool writes.
pub const SUMMARY_PATH: &str = "target/sigbench/summary.json";

/// Everything known about one completed benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Backend that was benchmarked.
    pub backend: Backend,
    /// Device mode actually used.
    pub device_mode: DeviceMode,
    /// Whether a CUDA request fell back to CPU.
    pub downgraded: bool,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Relative path of the generated report artifact.
    pub report_path: String,
    /// Complete measurement-harness output.
    #[serde(skip)]
    pub raw_output: String,
    /// Output after benchmark-marker filtering (identical to `raw_output`
    /// on verbose configurations).
    pub filtered_output: String,
}

/// Print the run's outcome for a human reader.
pub fn print_report(report: &RunReport) {
    print!("{}", report.filtered_output);

    if report.downgraded {
        tracing::warn!(backend = %report.backend, "CUDA was requested but CPU was used");
        eprintln!(
            "warning: CUDA was requested for backend '{}' but no accelerator was available; \
             results were measured on CPU",
            report.backend
        );
    }

    println!("Benchmark report: {}", report.report_path);
}

/// Write the JSON run summary, overwriting any previous one.
pub fn write_summary(report: &RunReport) -> io::Result<()> {
    write_summary_to(report, Path::new(SUMMARY_PATH))
}

fn write_summary_to(report: &RunReport, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
