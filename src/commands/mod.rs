//! CLI commands for pod-release
//!
//! - **release**: Bump podspecs, commit, tag, push and publish

pub mod release;

pub use release::{ReleaseOptions, run_release};
