//! Subprocess Abstraction
//!
//! Every external tool the pipeline touches (GPU query utility, build
//! toolchains, measurement harness) goes through the `ProcessRunner` trait.
//! Production code uses `SystemRunner`; tests substitute a recording fake so
//! scenario tests can assert which subprocesses were (and were not) invoked.

use std::io;
use std::path::PathBuf;
use std::process::Command;

/// A fully described subprocess invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Environment variables applied on top of the inherited environment.
    pub envs: Vec<(String, String)>,
    /// Working directory, when it differs from the harness's own.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Start describing an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Apply environment variables, preserving their order.
    pub fn envs(mut self, envs: &[(String, String)]) -> Self {
        self.envs.extend(envs.iter().cloned());
        self
    }

    /// Apply a single environment variable.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((name.into(), value.into()));
        self
    }

    /// Run from the given directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally (None when killed by a signal).
    pub code: Option<i32>,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, as one stream.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Blocking subprocess execution.
///
/// The pipeline waits synchronously on every call; there is no timeout or
/// cancellation, so a hung child blocks the run (accepted limitation).
pub trait ProcessRunner {
    /// Run the described command to completion and capture its output.
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;
}

/// `ProcessRunner` backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        for (name, value) in &spec.envs {
            command.env(name, value);
        }
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builder_preserves_order() {
        let spec = CommandSpec::new("cargo")
            .args(["build", "--release"])
            .arg("-p")
            .arg("sp1-host")
            .env("RUST_LOG", "warn")
            .current_dir("crates/sp1/guest");

        assert_eq!(spec.program, "cargo");
        assert_eq!(spec.args, vec!["build", "--release", "-p", "sp1-host"]);
        assert_eq!(spec.envs, vec![("RUST_LOG".to_string(), "warn".to_string())]);
        assert_eq!(spec.cwd.as_deref(), Some(std::path::Path::new("crates/sp1/guest")));
    }

    #[test]
    fn combined_output_is_stdout_then_stderr() {
        let out = CommandOutput {
            code: Some(1),
            stdout: "building\n".into(),
            stderr: "error: boom\n".into(),
        };
        assert!(!out.success());
        assert_eq!(out.combined(), "building\nerror: boom\n");
    }
}
