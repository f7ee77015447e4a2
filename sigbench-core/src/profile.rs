//! Backend Profiles
//!
//! Static descriptions of the proving backends the orchestrator knows how to
//! drive. Each profile records whether the backend needs an explicit guest
//! cross-compilation stage, which cargo package hosts the benchmark driver,
//! and which device modes the backend supports. The table replaces the
//! per-backend copy-pasted scripts this tool grew out of: one parameterized
//! pipeline consults the profile instead of duplicating itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proving backends the orchestrator can benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SP1-style zkVM: guest ELF is cross-compiled in a separate stage.
    Sp1,
    /// RISC0-style zkVM: guest compilation is embedded in the host build.
    Risc0,
}

impl Backend {
    /// Stable lowercase name used in logs and the run summary.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Sp1 => "sp1",
            Backend::Risc0 => "risc0",
        }
    }

    /// The static profile for this backend.
    pub fn profile(self) -> &'static BackendProfile {
        match self {
            Backend::Sp1 => &PROFILES[0],
            Backend::Risc0 => &PROFILES[1],
        }
    }

    /// The environment variable selecting this backend's prover, with the
    /// value appropriate for the given device mode.
    ///
    /// SP1 switches its prover implementation via `SP1_PROVER`; RISC0 always
    /// proves locally and moves CUDA work behind a cargo feature instead.
    pub fn prover_selector(self, mode: DeviceMode) -> (&'static str, &'static str) {
        match self {
            Backend::Sp1 => match mode {
                DeviceMode::Cpu => ("SP1_PROVER", "cpu"),
                DeviceMode::Cuda => ("SP1_PROVER", "cuda"),
            },
            Backend::Risc0 => ("RISC0_PROVER", "local"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution target for a proving backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    /// CPU-only execution.
    Cpu,
    /// GPU(CUDA)-accelerated execution.
    Cuda,
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMode::Cpu => f.write_str("cpu"),
            DeviceMode::Cuda => f.write_str("cuda"),
        }
    }
}

/// What to do when CUDA is requested but no accelerator is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Fail immediately with `HardwareUnavailable`; nothing is built or run.
    Strict,
    /// Silently select the CPU configuration, mark the run as downgraded,
    /// and proceed to a normal exit.
    Fallback,
}

/// Static description of one proving backend.
#[derive(Debug, Clone)]
pub struct BackendProfile {
    /// Which backend this profile describes.
    pub backend: Backend,
    /// Whether a guest cross-compilation stage must run before the host build.
    pub requires_guest_build: bool,
    /// Cargo package containing the host benchmark driver.
    pub host_package: &'static str,
    /// Directory of the guest program, for backends with an explicit guest stage.
    pub guest_dir: Option<&'static str>,
    /// Device modes this backend supports.
    pub supported_modes: &'static [DeviceMode],
}

impl BackendProfile {
    /// Whether the backend supports the given device mode.
    pub fn supports(&self, mode: DeviceMode) -> bool {
        self.supported_modes.contains(&mode)
    }
}

static PROFILES: [BackendProfile; 2] = [
    BackendProfile {
        backend: Backend::Sp1,
        requires_guest_build: true,
        host_package: "sp1-host",
        guest_dir: Some("crates/sp1/guest"),
        supported_modes: &[DeviceMode::Cpu, DeviceMode::Cuda],
    },
    BackendProfile {
        backend: Backend::Risc0,
        // The guest ELF is produced by the host package's build script, so
        // there is no separate stage to sequence.
        requires_guest_build: false,
        host_package: "risc0-host",
        guest_dir: None,
        supported_modes: &[DeviceMode::Cpu, DeviceMode::Cuda],
    },
];

/// All known backend profiles, in registration order.
pub fn profiles() -> &'static [BackendProfile] {
    &PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_stage_implies_guest_dir() {
        for profile in profiles() {
            if profile.requires_guest_build {
                assert!(
                    profile.guest_dir.is_some(),
                    "{} requires a guest build but names no guest directory",
                    profile.backend
                );
            }
        }
    }

    #[test]
    fn sp1_has_explicit_guest_stage() {
        let profile = Backend::Sp1.profile();
        assert!(profile.requires_guest_build);
        assert_eq!(profile.guest_dir, Some("crates/sp1/guest"));
    }

    #[test]
    fn risc0_embeds_guest_in_host_build() {
        let profile = Backend::Risc0.profile();
        assert!(!profile.requires_guest_build);
        assert!(profile.guest_dir.is_none());
    }

    #[test]
    fn every_backend_supports_both_modes() {
        for profile in profiles() {
            assert!(profile.supports(DeviceMode::Cpu));
            assert!(profile.supports(DeviceMode::Cuda));
        }
    }

    #[test]
    fn sp1_prover_selector_tracks_device_mode() {
        assert_eq!(
            Backend::Sp1.prover_selector(DeviceMode::Cuda),
            ("SP1_PROVER", "cuda")
        );
        assert_eq!(
            Backend::Sp1.prover_selector(DeviceMode::Cpu),
            ("SP1_PROVER", "cpu")
        );
        // RISC0 proves locally either way; CUDA rides on a cargo feature.
        assert_eq!(
            Backend::Risc0.prover_selector(DeviceMode::Cuda),
            ("RISC0_PROVER", "local")
        );
    }
}
