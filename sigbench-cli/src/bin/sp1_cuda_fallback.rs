//! SP1-style backend, CUDA execution, fallback hardware policy: a missing
//! accelerator downgrades the run to CPU instead of aborting.

use sigbench_core::{Backend, DeviceMode, Policy};

fn main() -> anyhow::Result<()> {
    sigbench_cli::run(Backend::Sp1, DeviceMode::Cuda, Policy::Fallback)
}
