//! Core building blocks shared by the release command
//!
//! - **config**: pod-release.toml parsing and validation
//! - **context**: Release workspace (working directory + config)
//! - **error**: Error types with contextual help messages and exit codes
//! - **process**: External command execution with captured output
//! - **vcs**: Git operations via the system `git` binary

pub mod config;
pub mod context;
pub mod error;
pub mod process;
pub mod vcs;
