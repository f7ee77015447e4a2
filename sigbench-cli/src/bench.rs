//! Benchmark Runner
//!
//! Invokes the external measurement harness (Criterion via `cargo bench`)
//! against the freshly built host package and returns its complete text
//! stream. A nonzero exit from the harness is fatal and its exit code is
//! propagated as the pipeline's own.

use crate::process::{CommandSpec, ProcessRunner};
use sigbench_core::{BackendProfile, BuildArtifact, BuildStage, EnvConfig, HarnessError};

/// Iterations per benchmark scenario. Ten repetitions give a stable
/// mean/median/std-dev/throughput estimate on a proving workload measured in
/// minutes, without an excessive wall-clock bill. Documented default, not an
/// invariant.
pub const SAMPLE_SIZE: u32 = 10;

/// Workload-shape defaults the measurement harness reads from its
/// environment: validator count, signature-tree height, and scheme variant.
pub const WORKLOAD_DEFAULTS: [(&str, &str); 3] = [
    ("BENCH_VALIDATORS", "16"),
    ("BENCH_TREE_HEIGHT", "13"),
    ("BENCH_SPEC", "2"),
];

/// Executes the measurement harness for one built host package.
pub struct BenchmarkRunner<'r> {
    runner: &'r dyn ProcessRunner,
}

impl<'r> BenchmarkRunner<'r> {
    /// Run benchmarks through the given subprocess runner.
    pub fn new(runner: &'r dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run the benchmark suite and return the harness's raw output.
    ///
    /// `artifacts` is the completion evidence from the build pipeline; the
    /// suite only runs against a finished host build.
    pub fn run(
        &self,
        artifacts: &[BuildArtifact],
        profile: &BackendProfile,
        config: &EnvConfig,
    ) -> Result<String, HarnessError> {
        debug_assert!(
            artifacts.iter().any(|a| a.stage == BuildStage::Host),
            "benchmark suite requires a completed host build"
        );

        tracing::info!(
            backend = %profile.backend,
            package = profile.host_package,
            sample_size = SAMPLE_SIZE,
            "running benchmark suite"
        );

        let mut spec = CommandSpec::new("cargo")
            .args(["bench", "-p", profile.host_package])
            .arg("--")
            .args(["--sample-size", &SAMPLE_SIZE.to_string()])
            .envs(config.vars());
        for (name, value) in WORKLOAD_DEFAULTS {
            spec = spec.env(name, value);
        }

        let output = self.runner.run(&spec).map_err(|source| HarnessError::Spawn {
            what: "benchmark harness",
            source,
        })?;

        if !output.success() {
            return Err(HarnessError::BenchmarkFailure {
                code: output.code,
                diagnostics: output.combined(),
            });
        }

        Ok(output.combined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CommandOutput;
    use sigbench_core::{select_config, Backend, DeviceCapability, DeviceMode, Policy};
    use std::io;
    use std::sync::Mutex;

    struct ScriptedRunner {
        calls: Mutex<Vec<CommandSpec>>,
        exit_code: i32,
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(spec.clone());
            Ok(CommandOutput {
                code: Some(self.exit_code),
                stdout: "xmss_aggregate/prove_16 time:   [412.33 s 415.80 s 419.51 s]\n".into(),
                stderr: String::new(),
            })
        }
    }

    fn host_artifact() -> Vec<BuildArtifact> {
        vec![BuildArtifact::completed(BuildStage::Host, "Finished\n")]
    }

    fn config() -> EnvConfig {
        select_config(
            Backend::Sp1.profile(),
            DeviceMode::Cpu,
            Policy::Strict,
            &DeviceCapability::absent(),
        )
        .unwrap()
    }

    #[test]
    fn passes_fixed_sample_size_to_harness() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            exit_code: 0,
        };
        BenchmarkRunner::new(&runner)
            .run(&host_artifact(), Backend::Sp1.profile(), &config())
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        let args = &calls[0].args;
        assert_eq!(args[..3], ["bench", "-p", "sp1-host"]);
        let sep = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(args[sep + 1..sep + 3], ["--sample-size", "10"]);
    }

    #[test]
    fn exports_workload_defaults() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            exit_code: 0,
        };
        BenchmarkRunner::new(&runner)
            .run(&host_artifact(), Backend::Sp1.profile(), &config())
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        for (name, value) in WORKLOAD_DEFAULTS {
            assert!(
                calls[0]
                    .envs
                    .iter()
                    .any(|(n, v)| n == name && v == value),
                "missing workload default {name}"
            );
        }
    }

    #[test]
    fn returns_raw_output_unprocessed() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            exit_code: 0,
        };
        let raw = BenchmarkRunner::new(&runner)
            .run(&host_artifact(), Backend::Sp1.profile(), &config())
            .unwrap();
        assert!(raw.contains("time:"));
    }

    #[test]
    fn nonzero_harness_exit_is_fatal() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            exit_code: 3,
        };
        let err = BenchmarkRunner::new(&runner)
            .run(&host_artifact(), Backend::Sp1.profile(), &config())
            .unwrap_err();

        match err {
            HarnessError::BenchmarkFailure { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("expected BenchmarkFailure, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 3);
    }
}
