use crate::core::error::{ConfigError, PodError, PodResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted into the commit message template
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Configuration for pod-release
/// Searched in order: pod-release.toml, .pod-release.toml, .config/pod-release.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PodReleaseConfig {
  #[serde(default)]
  pub release: ReleaseSettings,
  #[serde(default)]
  pub publish: PublishSettings,
}

/// How versions are resolved and podspecs rewritten
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSettings {
  /// Label of the summary line (`<label>: <current> -> <next>`)
  #[serde(default = "default_label")]
  pub label: String,

  /// Tag assumed when the repository has no tags yet
  #[serde(default = "default_fallback_tag")]
  pub fallback_tag: String,

  /// Commit message template, `{version}` is replaced
  #[serde(default = "default_message")]
  pub message: String,

  /// Substring a file name must contain to count as a podspec
  #[serde(default = "default_extension")]
  pub extension: String,

  /// How version and tag values are rewritten
  #[serde(default)]
  pub edit: EditMode,
}

fn default_label() -> String {
  "Ethos".to_string()
}

fn default_fallback_tag() -> String {
  "v0.1.0".to_string()
}

fn default_message() -> String {
  format!("new pod release version {}", VERSION_PLACEHOLDER)
}

fn default_extension() -> String {
  ".podspec".to_string()
}

impl Default for ReleaseSettings {
  fn default() -> Self {
    Self {
      label: default_label(),
      fallback_tag: default_fallback_tag(),
      message: default_message(),
      extension: default_extension(),
      edit: EditMode::default(),
    }
  }
}

impl ReleaseSettings {
  /// Render the default commit message for `version`
  pub fn render_message(&self, version: &str) -> String {
    self.message.replace(VERSION_PLACEHOLDER, version)
  }
}

/// Podspec rewrite strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
  /// Replace only the value of the matched declaration
  #[default]
  Field,
  /// Replace every literal occurrence of the old value in the file
  Literal,
}

/// The publish command run once per podspec
///
/// Expands to `<program> <args...> [--allow-warnings] <Name><repo_suffix> <file>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSettings {
  #[serde(default = "default_program")]
  pub program: String,

  #[serde(default = "default_publish_args")]
  pub args: Vec<String>,

  #[serde(default = "default_true")]
  pub allow_warnings: bool,

  /// Appended to the pod name to form the spec repository name
  #[serde(default = "default_repo_suffix")]
  pub repo_suffix: String,
}

fn default_program() -> String {
  "pod".to_string()
}

fn default_publish_args() -> Vec<String> {
  vec!["repo".to_string(), "push".to_string()]
}

fn default_true() -> bool {
  true
}

fn default_repo_suffix() -> String {
  "Spec".to_string()
}

impl Default for PublishSettings {
  fn default() -> Self {
    Self {
      program: default_program(),
      args: default_publish_args(),
      allow_warnings: true,
      repo_suffix: default_repo_suffix(),
    }
  }
}

impl PodReleaseConfig {
  /// Find config file in search order: pod-release.toml, .pod-release.toml, .config/pod-release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("pod-release.toml"),
      path.join(".pod-release.toml"),
      path.join(".config").join("pod-release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from `path`, or defaults when no config file exists
  pub fn load(path: &Path) -> PodResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(dir = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: PodReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Parse {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    config.validate()?;
    tracing::debug!(path = %config_path.display(), "loaded config");

    Ok(config)
  }

  /// Reject values the pipeline cannot work with
  pub fn validate(&self) -> PodResult<()> {
    let invalid = |reason: &str| PodError::Config(ConfigError::Invalid {
      reason: reason.to_string(),
    });

    if !self.release.message.contains(VERSION_PLACEHOLDER) {
      return Err(invalid("release.message must contain {version}"));
    }
    if self.release.extension.is_empty() {
      return Err(invalid("release.extension must not be empty"));
    }
    if self.release.fallback_tag.trim().is_empty() {
      return Err(invalid("release.fallback_tag must not be empty"));
    }
    if self.publish.program.trim().is_empty() {
      return Err(invalid("publish.program must not be empty"));
    }

    Ok(())
  }
}
