//! Hardware Probe
//!
//! Asks the OS whether a CUDA accelerator is present. The query never fails:
//! a missing or erroring query utility is reported as "no accelerator", and
//! the policy layer decides what to do about it. Probing sits behind the
//! `GpuProbe` trait so future accelerator families plug in without another
//! copy of the orchestration code.

use crate::process::{CommandSpec, ProcessRunner};
use sigbench_core::DeviceCapability;

/// The vendor query utility consulted for CUDA devices.
pub const GPU_QUERY_PROGRAM: &str = "nvidia-smi";

/// Capability query for one accelerator family.
pub trait GpuProbe {
    /// Query accelerator presence. Idempotent; results are never cached by
    /// the pipeline, so repeated calls within one run stay consistent with
    /// the machine's actual state.
    fn probe(&self) -> DeviceCapability;
}

/// CUDA probe that shells out to `nvidia-smi`.
pub struct NvidiaSmiProbe<'r> {
    runner: &'r dyn ProcessRunner,
}

impl<'r> NvidiaSmiProbe<'r> {
    /// Probe through the given subprocess runner.
    pub fn new(runner: &'r dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl GpuProbe for NvidiaSmiProbe<'_> {
    fn probe(&self) -> DeviceCapability {
        let spec = CommandSpec::new(GPU_QUERY_PROGRAM)
            .args(["--query-gpu=name", "--format=csv,noheader"]);

        match self.runner.run(&spec) {
            Ok(output) if output.success() => {
                // One device name per line; the pipeline pins itself to the
                // first (index 0) device.
                match output.stdout.lines().find(|l| !l.trim().is_empty()) {
                    Some(name) => DeviceCapability::detected(name.trim()),
                    None => DeviceCapability {
                        present: true,
                        descriptor: None,
                    },
                }
            }
            // Nonzero exit or an unlaunchable utility both mean "no GPU".
            _ => DeviceCapability::absent(),
        }
    }
}
