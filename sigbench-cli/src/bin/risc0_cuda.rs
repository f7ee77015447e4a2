//! RISC0-style backend, CUDA execution, strict hardware policy: a missing
//! accelerator aborts the run before anything is built.

use sigbench_core::{Backend, DeviceMode, Policy};

fn main() -> anyhow::Result<()> {
    sigbench_cli::run(Backend::Risc0, DeviceMode::Cuda, Policy::Strict)
}
