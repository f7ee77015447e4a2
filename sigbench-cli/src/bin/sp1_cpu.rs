//! SP1-style backend, CPU-only execution.

use sigbench_core::{Backend, DeviceMode, Policy};

fn main() -> anyhow::Result<()> {
    sigbench_cli::run(Backend::Sp1, DeviceMode::Cpu, Policy::Strict)
}
