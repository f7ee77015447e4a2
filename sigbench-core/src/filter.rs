//! Output Filtering
//!
//! The measurement harness (Criterion under `cargo bench`) interleaves its
//! timing lines with compiler chatter and progress noise. On quiet (CUDA)
//! runs we keep only benchmark-relevant lines: timing values, in-progress
//! benchmark names, summary statistics, and plot/report-generation notices.
//!
//! Two contracts matter here:
//! - If no line matches at all (the harness's output format changed), the
//!   full input is returned unchanged — benchmark evidence is never dropped.
//! - Filtering is deterministic and idempotent; filtering already-filtered
//!   output yields the same text.

use crate::config::EnvConfig;
use regex::Regex;
use std::sync::OnceLock;

/// Lines worth keeping in reduced-verbosity mode.
fn marker_regex() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| {
        Regex::new(
            r"(?x)
            time:              # timing line
            | thrpt:           # throughput line
            | Benchmarking     # in-progress benchmark name
            | change:          # regression/improvement vs. previous run
            | \bmean\b
            | \bmedian\b
            | std\.\ dev
            | Gnuplot          # plotting backend notice
            | [Pp]lotting
            | report",
        )
        .expect("marker regex is valid")
    })
}

/// Reduce the measurement harness's raw output to benchmark-relevant lines.
///
/// Verbose (CPU) configurations pass the stream through untouched.
pub fn filter_output(raw: &str, config: &EnvConfig) -> String {
    if !config.reduced_verbosity() {
        return raw.to_string();
    }
    filter_lines(raw)
}

fn filter_lines(raw: &str) -> String {
    let markers = marker_regex();
    let kept: Vec<&str> = raw.lines().filter(|line| markers.is_match(line)).collect();

    if kept.is_empty() {
        // Unknown output format: surface everything rather than nothing.
        tracing::debug!("no benchmark markers matched; passing output through unfiltered");
        return raw.to_string();
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}
