//! Release workspace - build once, pass everywhere
//!
//! The working directory and its configuration are resolved once in
//! `main.rs` and handed to every operation by reference. Nothing below the
//! command layer reads the process's current directory.

use crate::core::config::PodReleaseConfig;
use crate::core::error::{PodResult, ResultExt};
use std::path::{Path, PathBuf};

/// Directory a release runs in, plus its configuration
#[derive(Debug, Clone)]
pub struct Workspace {
  /// Absolute path of the directory holding the podspecs
  pub root: PathBuf,

  /// pod-release.toml, or defaults
  pub config: PodReleaseConfig,
}

impl Workspace {
  /// Build a workspace rooted at `dir`, loading its config
  pub fn build(dir: &Path) -> PodResult<Self> {
    let root = dir
      .canonicalize()
      .with_context(|| format!("Failed to resolve working directory {}", dir.display()))?;
    let config = PodReleaseConfig::load(&root)?;

    Ok(Self { root, config })
  }

  /// Workspace with an explicit config, skipping the config file lookup
  #[cfg(test)]
  pub fn with_config(root: impl Into<PathBuf>, config: PodReleaseConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  /// Get workspace root as Path reference (convenience)
  pub fn root(&self) -> &Path {
    &self.root
  }
}
