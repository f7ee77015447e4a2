//! Error Taxonomy
//!
//! Every fatal condition the pipeline can hit, with the process exit code it
//! maps to. All of these abort the run immediately; nothing is retried or
//! recovered. A CUDA-to-CPU downgrade under the fallback policy is *not* an
//! error and does not appear here.

use crate::artifact::BuildStage;
use crate::profile::DeviceMode;
use thiserror::Error;

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// CUDA was requested under the strict policy but no accelerator exists.
    #[error(
        "no CUDA-capable accelerator detected for backend '{backend}' \
         (the GPU query utility found no device); \
         use the CPU entry point or the CUDA fallback variant"
    )]
    HardwareUnavailable {
        /// Backend that was about to run.
        backend: &'static str,
    },

    /// The requested device mode is not in the backend's supported set.
    #[error("backend '{backend}' does not support device mode '{mode}'")]
    UnsupportedMode {
        /// Backend that was about to run.
        backend: &'static str,
        /// The unsupported mode.
        mode: DeviceMode,
    },

    /// A build stage exited nonzero. Diagnostics are the toolchain's output,
    /// surfaced verbatim.
    #[error("{stage} build failed (exit status {code:?})\n{diagnostics}")]
    BuildFailure {
        /// Stage that failed.
        stage: BuildStage,
        /// Child exit code, if the process exited normally.
        code: Option<i32>,
        /// Toolchain output, unmodified.
        diagnostics: String,
    },

    /// The measurement harness exited nonzero.
    #[error("benchmark harness failed (exit status {code:?})\n{diagnostics}")]
    BenchmarkFailure {
        /// Child exit code, if the process exited normally.
        code: Option<i32>,
        /// Harness output, unmodified.
        diagnostics: String,
    },

    /// A subprocess could not be launched at all.
    #[error("failed to launch {what}: {source}")]
    Spawn {
        /// Human-readable name of what was being launched.
        what: &'static str,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Process exit code for this error.
    ///
    /// Build and benchmark failures propagate the child's exit code when one
    /// exists (signal-terminated children fall back to 1); everything else
    /// is a plain 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::HardwareUnavailable { .. } => 1,
            HarnessError::UnsupportedMode { .. } => 1,
            HarnessError::BuildFailure { code, .. } => code.unwrap_or(1),
            HarnessError::BenchmarkFailure { code, .. } => code.unwrap_or(1),
            HarnessError::Spawn { .. } => 1,
        }
    }
}
