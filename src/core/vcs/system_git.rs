//! System git backend
//!
//! Every operation shells out to the `git` binary on PATH with the caller's
//! environment, so identity, credentials and proxies configured through env
//! vars reach git unchanged. Read-only queries never echo; the mutating
//! release steps echo their command line and output unless the caller asks
//! for quiet mode.

use crate::core::error::{GitError, PodError, PodResult, ResultExt};
use crate::core::process::{CommandOutput, run_command};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Directory commands run in (the release working directory)
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> PodResult<Self> {
    let output = Command::new("git")
      .current_dir(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(PodError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(PodError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = PathBuf::from(stdout.trim());
    tracing::debug!(work_tree = %work_tree.display(), "opened git repository");

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree,
    })
  }

  /// Working tree root of the repository
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// All tags, most recently created first (`git tag --sort=-creatordate`)
  pub fn tags_by_creation_date(&self) -> PodResult<Vec<String>> {
    let output = self.run(&["tag", "--sort=-creatordate"], false)?.into_checked()?;
    Ok(parse_tag_list(&output.stdout))
  }

  /// Most recently created tag, or `fallback` when the repository has none
  pub fn latest_tag(&self, fallback: &str) -> PodResult<String> {
    let tag = self
      .tags_by_creation_date()?
      .into_iter()
      .next()
      .unwrap_or_else(|| fallback.to_string());
    tracing::debug!(%tag, "latest tag");
    Ok(tag)
  }

  /// Stage everything under the working directory (`git add .`)
  pub fn add_all(&self, echo: bool) -> PodResult<CommandOutput> {
    self.run(&["add", "."], echo)?.into_checked()
  }

  /// Commit changes under the working directory with `message`
  ///
  /// The `.` pathspec limits the commit to the working directory, leaving
  /// anything staged elsewhere in the repository out of the release commit.
  pub fn commit(&self, message: &str, echo: bool) -> PodResult<CommandOutput> {
    self.run(&["commit", "-m", message, "."], echo)?.into_checked()
  }

  /// Create a lightweight tag at HEAD
  pub fn create_tag(&self, name: &str, echo: bool) -> PodResult<CommandOutput> {
    self.run(&["tag", name], echo)?.into_checked()
  }

  /// Push the current branch to its upstream
  pub fn push(&self, echo: bool) -> PodResult<CommandOutput> {
    self.run(&["push"], echo)?.into_checked()
  }

  /// Push all tags to the default remote
  pub fn push_tags(&self, echo: bool) -> PodResult<CommandOutput> {
    self.run(&["push", "--tags"], echo)?.into_checked()
  }

  fn run(&self, args: &[&str], echo: bool) -> PodResult<CommandOutput> {
    let mut cmd = self.git_cmd();
    cmd.args(args);
    run_command(cmd, echo)
  }

  /// Create a git command running in the release working directory
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(&self.repo_path);
    cmd
  }
}

/// Split `git tag` output into tag names, dropping the trailing newline
fn parse_tag_list(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .collect()
}
