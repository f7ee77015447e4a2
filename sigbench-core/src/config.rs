//! Environment Configuration Selection
//!
//! Combines a backend profile, the requested device mode, the hardware
//! policy, and a fresh capability probe into the one immutable environment
//! configuration the rest of the pipeline runs under. This is where the
//! strict-vs-fallback split lives: strict turns a missing GPU into
//! `HardwareUnavailable` before anything is built, fallback quietly selects
//! the CPU configuration and marks the run as downgraded.

use crate::capability::DeviceCapability;
use crate::error::HarnessError;
use crate::profile::{BackendProfile, DeviceMode, Policy};
use serde::Serialize;

/// Environment variable restricting which GPU the backend may use.
pub const ENV_CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";
/// Environment variable controlling subprocess log verbosity.
pub const ENV_LOG: &str = "RUST_LOG";
/// Environment variable carrying compiler flags for the host build.
pub const ENV_RUSTFLAGS: &str = "RUSTFLAGS";

/// The single GPU index the pipeline pins itself to. Documented default,
/// not a hard invariant; multi-GPU partitioning is out of scope.
pub const GPU_DEVICE_INDEX: &str = "0";

/// Cargo feature enabling the CUDA proving path in host packages.
pub const CUDA_FEATURE: &str = "cuda";

/// Immutable environment configuration for one pipeline invocation.
///
/// The variable list is ordered; it is applied to every subprocess the
/// pipeline spawns after selection.
#[derive(Debug, Clone, Serialize)]
pub struct EnvConfig {
    /// Device mode actually in effect (may differ from the request under
    /// the fallback policy).
    pub device_mode: DeviceMode,
    /// Whether a CUDA request was downgraded to CPU.
    pub downgraded: bool,
    vars: Vec<(String, String)>,
}

impl EnvConfig {
    /// The ordered environment variables to apply to spawned subprocesses.
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether subprocess output should be reduced to benchmark-relevant
    /// lines. CUDA-optimized paths run quiet; CPU paths stay verbose.
    pub fn reduced_verbosity(&self) -> bool {
        self.device_mode == DeviceMode::Cuda
    }

    /// Cargo feature to pass to the host build, if the device mode needs one.
    pub fn cuda_feature(&self) -> Option<&'static str> {
        match self.device_mode {
            DeviceMode::Cuda => Some(CUDA_FEATURE),
            DeviceMode::Cpu => None,
        }
    }
}

/// Select the environment configuration for one invocation.
///
/// CPU requests ignore the capability probe entirely. CUDA requests on a
/// GPU-less machine either fail (`Policy::Strict`) or downgrade to the CPU
/// configuration (`Policy::Fallback`).
pub fn select_config(
    profile: &BackendProfile,
    requested: DeviceMode,
    policy: Policy,
    capability: &DeviceCapability,
) -> Result<EnvConfig, HarnessError> {
    if !profile.supports(requested) {
        return Err(HarnessError::UnsupportedMode {
            backend: profile.backend.name(),
            mode: requested,
        });
    }

    let (effective, downgraded) = match requested {
        DeviceMode::Cpu => (DeviceMode::Cpu, false),
        DeviceMode::Cuda if capability.present => (DeviceMode::Cuda, false),
        DeviceMode::Cuda => match policy {
            Policy::Strict => {
                return Err(HarnessError::HardwareUnavailable {
                    backend: profile.backend.name(),
                });
            }
            Policy::Fallback => {
                tracing::warn!(
                    backend = profile.backend.name(),
                    "CUDA requested but no accelerator present; falling back to CPU"
                );
                (DeviceMode::Cpu, true)
            }
        },
    };

    let mut vars = Vec::new();

    let (selector, value) = profile.backend.prover_selector(effective);
    vars.push((selector.to_string(), value.to_string()));

    match effective {
        DeviceMode::Cuda => {
            vars.push((
                ENV_CUDA_VISIBLE_DEVICES.to_string(),
                GPU_DEVICE_INDEX.to_string(),
            ));
            vars.push((ENV_LOG.to_string(), "warn".to_string()));
            // The CUDA proving path hands hashing-heavy witness generation
            // to natively vectorized host code.
            vars.push((ENV_RUSTFLAGS.to_string(), "-C target-cpu=native".to_string()));
        }
        DeviceMode::Cpu => {
            vars.push((ENV_LOG.to_string(), "info".to_string()));
        }
    }

    Ok(EnvConfig {
        device_mode: effective,
        downgraded,
        vars,
    })
}
