#![warn(missing_docs)]
//! Sigbench Core - Data Model and Decision Logic
//!
//! This crate holds everything the benchmark orchestrator decides *before*
//! touching a subprocess:
//! - Static backend profiles (which proving backends exist, what they need built)
//! - Device capability descriptions produced by the hardware probe
//! - Environment configuration selection, including the strict/fallback
//!   policy split for CUDA requests on GPU-less machines
//! - Output filtering for the measurement harness's noisy text stream
//! - The error taxonomy shared by every pipeline stage
//!
//! Nothing in here spawns a process; the orchestration side lives in
//! `sigbench-cli`.

mod artifact;
mod capability;
mod config;
mod error;
mod filter;
mod profile;

pub use artifact::{BuildArtifact, BuildStage};
pub use capability::DeviceCapability;
pub use config::{EnvConfig, select_config, CUDA_FEATURE, ENV_CUDA_VISIBLE_DEVICES, ENV_LOG, ENV_RUSTFLAGS, GPU_DEVICE_INDEX};
pub use error::HarnessError;
pub use filter::filter_output;
pub use profile::{Backend, BackendProfile, DeviceMode, Policy, profiles};
