//! Build Pipeline
//!
//! Drives the two-phase build: guest cross-compilation first (only for
//! backends that require it), then the host benchmark driver. Stage order is
//! fixed, a nonzero exit from either stage aborts the whole run, and the
//! toolchain's diagnostics are surfaced verbatim. Nothing is reused across
//! invocations; every run builds from the current tree.

use crate::process::{CommandSpec, ProcessRunner};
use sigbench_core::{BackendProfile, BuildArtifact, BuildStage, EnvConfig, HarnessError};

/// Sequential guest-then-host build executor.
pub struct BuildPipeline<'r> {
    runner: &'r dyn ProcessRunner,
}

impl<'r> BuildPipeline<'r> {
    /// Build through the given subprocess runner.
    pub fn new(runner: &'r dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run the build stages for `profile` under `config`.
    ///
    /// Returns one artifact per completed stage, in execution order. The
    /// host artifact is always last.
    pub fn build(
        &self,
        profile: &BackendProfile,
        config: &EnvConfig,
    ) -> Result<Vec<BuildArtifact>, HarnessError> {
        let mut artifacts = Vec::with_capacity(2);

        if profile.requires_guest_build {
            artifacts.push(self.guest_stage(profile, config)?);
        }
        artifacts.push(self.host_stage(profile, config)?);

        Ok(artifacts)
    }

    fn guest_stage(
        &self,
        profile: &BackendProfile,
        config: &EnvConfig,
    ) -> Result<BuildArtifact, HarnessError> {
        // The profile table guarantees a guest directory for backends that
        // require a guest build (checked by the profile tests).
        let guest_dir = profile.guest_dir.unwrap_or(".");

        tracing::info!(backend = %profile.backend, dir = guest_dir, "building guest program");
        let spec = CommandSpec::new("cargo")
            .args(["prove", "build"])
            .envs(config.vars())
            .current_dir(guest_dir);

        self.run_stage(BuildStage::Guest, &spec, "guest build toolchain")
    }

    fn host_stage(
        &self,
        profile: &BackendProfile,
        config: &EnvConfig,
    ) -> Result<BuildArtifact, HarnessError> {
        tracing::info!(
            backend = %profile.backend,
            package = profile.host_package,
            mode = %config.device_mode,
            "building host package"
        );
        let mut spec = CommandSpec::new("cargo")
            .args(["build", "--release", "-p", profile.host_package])
            .envs(config.vars());
        if let Some(feature) = config.cuda_feature() {
            spec = spec.args(["--features", feature]);
        }

        self.run_stage(BuildStage::Host, &spec, "host build toolchain")
    }

    fn run_stage(
        &self,
        stage: BuildStage,
        spec: &CommandSpec,
        what: &'static str,
    ) -> Result<BuildArtifact, HarnessError> {
        let output = self
            .runner
            .run(spec)
            .map_err(|source| HarnessError::Spawn { what, source })?;

        if !output.success() {
            return Err(HarnessError::BuildFailure {
                stage,
                code: output.code,
                diagnostics: output.combined(),
            });
        }

        tracing::info!(%stage, "build stage completed");
        Ok(BuildArtifact::completed(stage, output.combined()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CommandOutput;
    use sigbench_core::{select_config, Backend, DeviceCapability, DeviceMode, Policy};
    use std::io;
    use std::sync::Mutex;

    /// Runner that records every invocation and fails commands whose
    /// arguments contain a configured marker.
    struct ScriptedRunner {
        calls: Mutex<Vec<CommandSpec>>,
        fail_on: Option<&'static str>,
    }

    impl ScriptedRunner {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }

        fn calls(&self) -> Vec<CommandSpec> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(spec.clone());
            let fail = self
                .fail_on
                .is_some_and(|marker| spec.args.iter().any(|a| a == marker));
            Ok(if fail {
                CommandOutput {
                    code: Some(101),
                    stdout: String::new(),
                    stderr: "error[E0433]: failed to resolve\n".into(),
                }
            } else {
                CommandOutput {
                    code: Some(0),
                    stdout: "Finished\n".into(),
                    stderr: String::new(),
                }
            })
        }
    }

    fn cpu_config(backend: Backend) -> EnvConfig {
        select_config(
            backend.profile(),
            DeviceMode::Cpu,
            Policy::Strict,
            &DeviceCapability::absent(),
        )
        .unwrap()
    }

    fn cuda_config(backend: Backend) -> EnvConfig {
        select_config(
            backend.profile(),
            DeviceMode::Cuda,
            Policy::Strict,
            &DeviceCapability::detected("NVIDIA T4"),
        )
        .unwrap()
    }

    #[test]
    fn guest_stage_runs_strictly_before_host() {
        let runner = ScriptedRunner::new(None);
        let artifacts = BuildPipeline::new(&runner)
            .build(Backend::Sp1.profile(), &cpu_config(Backend::Sp1))
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args[..2], ["prove", "build"]);
        assert_eq!(
            calls[0].cwd.as_deref(),
            Some(std::path::Path::new("crates/sp1/guest"))
        );
        assert_eq!(calls[1].args[0], "build");

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].stage, BuildStage::Guest);
        assert_eq!(artifacts[1].stage, BuildStage::Host);
    }

    #[test]
    fn backends_without_guest_stage_skip_it() {
        let runner = ScriptedRunner::new(None);
        let artifacts = BuildPipeline::new(&runner)
            .build(Backend::Risc0.profile(), &cpu_config(Backend::Risc0))
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "build");
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].stage, BuildStage::Host);
    }

    #[test]
    fn cuda_config_enables_cuda_feature_on_host_build() {
        let runner = ScriptedRunner::new(None);
        BuildPipeline::new(&runner)
            .build(Backend::Risc0.profile(), &cuda_config(Backend::Risc0))
            .unwrap();

        let calls = runner.calls();
        let host = &calls[0];
        let feature_pos = host.args.iter().position(|a| a == "--features");
        assert!(feature_pos.is_some(), "host build must request --features");
        assert_eq!(host.args[feature_pos.unwrap() + 1], "cuda");
    }

    #[test]
    fn cpu_config_requests_no_features() {
        let runner = ScriptedRunner::new(None);
        BuildPipeline::new(&runner)
            .build(Backend::Risc0.profile(), &cpu_config(Backend::Risc0))
            .unwrap();

        assert!(!runner.calls()[0].args.iter().any(|a| a == "--features"));
    }

    #[test]
    fn guest_failure_aborts_before_host() {
        let runner = ScriptedRunner::new(Some("prove"));
        let err = BuildPipeline::new(&runner)
            .build(Backend::Sp1.profile(), &cpu_config(Backend::Sp1))
            .unwrap_err();

        match err {
            HarnessError::BuildFailure {
                stage,
                code,
                diagnostics,
            } => {
                assert_eq!(stage, BuildStage::Guest);
                assert_eq!(code, Some(101));
                assert!(diagnostics.contains("error[E0433]"), "diagnostics verbatim");
            }
            other => panic!("expected BuildFailure, got {other:?}"),
        }
        // The host stage must never have been attempted.
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn stages_inherit_selected_environment() {
        let runner = ScriptedRunner::new(None);
        let config = cuda_config(Backend::Sp1);
        BuildPipeline::new(&runner)
            .build(Backend::Sp1.profile(), &config)
            .unwrap();

        for call in runner.calls() {
            assert_eq!(call.envs, config.vars().to_vec());
        }
    }
}
