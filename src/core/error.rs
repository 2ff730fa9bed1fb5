//! Error types for pod-release with contextual messages and exit codes
//!
//! Every failure the release pipeline can hit maps to one `PodError` variant.
//! Errors carry an exit code and, where a next step is obvious, a help line
//! that `print_error` shows under the message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for pod-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad version, malformed podspec, config, no pods)
  User = 1,
  /// System error (git, I/O, spawning processes)
  System = 2,
  /// One or more pods failed to publish
  Publish = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for pod-release
#[derive(Debug)]
pub enum PodError {
  /// Version arithmetic errors
  Version(VersionError),

  /// Podspec field lookup errors
  Spec(SpecError),

  /// Git operation errors
  Git(GitError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Pod filters resolved to nothing
  NoPodsMatched { filters: Vec<String> },

  /// `pod repo push` failed for these spec files
  PublishFailed { pods: Vec<String> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PodError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PodError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PodError::Message { message, context, help } => PodError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PodError::Io(e) => PodError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PodError::Version(_) => ExitCode::User,
      PodError::Spec(_) => ExitCode::User,
      PodError::Config(_) => ExitCode::User,
      PodError::NoPodsMatched { .. } => ExitCode::User,
      PodError::Git(_) => ExitCode::System,
      PodError::Io(_) => ExitCode::System,
      PodError::PublishFailed { .. } => ExitCode::Publish,
      PodError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PodError::Version(e) => e.help_message(),
      PodError::Spec(e) => e.help_message(),
      PodError::Git(e) => e.help_message(),
      PodError::Config(e) => e.help_message(),
      PodError::NoPodsMatched { .. } => {
        Some("Pod names are matched case-insensitively against *.podspec files in the working directory.".to_string())
      }
      PodError::PublishFailed { pods } => Some(format!(
        "Commits and tags are already pushed. Retry with `pod repo push` for: {}",
        pods.join(", ")
      )),
      PodError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PodError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PodError::Version(e) => write!(f, "{}", e),
      PodError::Spec(e) => write!(f, "{}", e),
      PodError::Git(e) => write!(f, "{}", e),
      PodError::Config(e) => write!(f, "{}", e),
      PodError::Io(e) => write!(f, "I/O error: {}", e),
      PodError::NoPodsMatched { filters } => {
        if filters.is_empty() {
          write!(f, "No podspec files found")
        } else {
          write!(f, "No podspec files match: {}", filters.join(", "))
        }
      }
      PodError::PublishFailed { pods } => {
        write!(f, "Failed to publish {} pod(s): {}", pods.len(), pods.join(", "))
      }
      PodError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PodError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PodError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PodError {
  fn from(err: io::Error) -> Self {
    PodError::Io(err)
  }
}

impl From<VersionError> for PodError {
  fn from(err: VersionError) -> Self {
    PodError::Version(err)
  }
}

impl From<SpecError> for PodError {
  fn from(err: SpecError) -> Self {
    PodError::Spec(err)
  }
}

impl From<GitError> for PodError {
  fn from(err: GitError) -> Self {
    PodError::Git(err)
  }
}

impl From<ConfigError> for PodError {
  fn from(err: ConfigError) -> Self {
    PodError::Config(err)
  }
}

impl From<serde_json::Error> for PodError {
  fn from(err: serde_json::Error) -> Self {
    PodError::message(format!("JSON error: {}", err))
  }
}

/// Version string errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
  /// No `.` separating major from minor
  NoMinor { version: String },

  /// Minor segment is not a non-negative integer
  InvalidMinor { version: String, minor: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    Some("Versions must look like <major>.<minor> with a numeric minor, e.g. 1.2 or v1.2.3. Pass --version to override.".to_string())
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::NoMinor { version } => {
        write!(f, "Invalid version '{}': expected <major>.<minor>", version)
      }
      VersionError::InvalidMinor { version, minor } => {
        write!(f, "Invalid version '{}': minor segment '{}' is not a number", version, minor)
      }
    }
  }
}

/// Podspec lookup errors
#[derive(Debug)]
pub enum SpecError {
  /// The expected assignment is missing from the file
  FieldNotFound { file: PathBuf, field: &'static str },
}

impl SpecError {
  fn help_message(&self) -> Option<String> {
    match self {
      SpecError::FieldNotFound { field, .. } => Some(format!(
        "The podspec must declare {}",
        match *field {
          "version" => "s.version = \"X.Y\"",
          _ => "a source with :tag => \"vX.Y\"",
        }
      )),
    }
  }
}

impl fmt::Display for SpecError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SpecError::FieldNotFound { file, field } => {
        write!(f, "No {} declaration found in {}", field, file.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command exited unsuccessfully
  CommandFailed {
    command: String,
    status: Option<i32>,
    stderr: String,
  },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { command, stderr, .. } => {
        if stderr.contains("non-fast-forward") || stderr.contains("rejected") {
          Some("The remote has commits you don't have. Pull, then re-run the release.".to_string())
        } else if stderr.contains("already exists") && command.contains(" tag ") {
          Some("That tag already exists. Pass --version to pick another one.".to_string())
        } else if stderr.contains("nothing to commit") || stderr.contains("nothing added to commit") {
          Some("No podspec changed. Check the pods you selected.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run pod-release from inside a git repository or pass -C: {}",
        path.display()
      )),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, status, stderr } => {
        match status {
          Some(code) => write!(f, "Git command failed (exit {}): {}", code, command)?,
          None => write!(f, "Git command terminated by signal: {}", command)?,
        }
        let stderr = stderr.trim();
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file could not be parsed
  Parse { path: PathBuf, reason: String },

  /// Config parsed but holds an unusable value
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Check pod-release.toml for TOML syntax errors or unknown keys.".to_string()),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse config {}: {}", path.display(), reason)
      }
      ConfigError::Invalid { reason } => write!(f, "Invalid configuration: {}", reason),
    }
  }
}

/// Result type alias for pod-release
pub type PodResult<T> = Result<T, PodError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PodResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PodResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PodError>,
{
  fn context(self, ctx: impl Into<String>) -> PodResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PodResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PodError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
