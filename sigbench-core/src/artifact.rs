//! Build Artifacts
//!
//! Completion signals handed from the build pipeline to the benchmark
//! runner. An artifact is evidence a stage finished, not a path to a binary;
//! cargo owns the actual output locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stage of the two-phase build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStage {
    /// Guest program cross-compilation for the backend's zkVM target.
    Guest,
    /// Host benchmark driver compilation.
    Host,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStage::Guest => f.write_str("guest"),
            BuildStage::Host => f.write_str("host"),
        }
    }
}

/// Evidence that a build stage completed successfully.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Which stage produced this artifact.
    pub stage: BuildStage,
    /// Toolchain output captured during the stage, kept for the run summary.
    pub diagnostics: String,
}

impl BuildArtifact {
    /// Record a completed stage with its captured toolchain output.
    pub fn completed(stage: BuildStage, diagnostics: impl Into<String>) -> Self {
        Self {
            stage,
            diagnostics: diagnostics.into(),
        }
    }
}
