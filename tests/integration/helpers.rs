//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A podspec repository with a local bare `origin`
pub struct TestRepo {
  _root: TempDir,
  _origin: TempDir,
  pub path: PathBuf,
  pub origin: PathBuf,
}

impl TestRepo {
  /// Create a repository with one commit on `main`, pushed to `origin`
  ///
  /// Publishing is routed to `echo` through pod-release.toml so the publish
  /// arguments show up on stdout.
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let origin_root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let origin = origin_root.path().join("origin.git");

    git(origin_root.path(), &["init", "--bare", "--initial-branch=main", "origin.git"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["remote", "add", "origin", &origin.to_string_lossy()])?;

    std::fs::write(path.join("pod-release.toml"), "[publish]\nprogram = \"echo\"\n")?;
    std::fs::write(path.join("README.md"), "# Pods\n")?;

    let repo = Self {
      _root: root,
      _origin: origin_root,
      path,
      origin,
    };
    repo.commit_at("Initial commit", "2024-01-01T00:00:00Z")?;
    git(&repo.path, &["push", "-u", "origin", "main"])?;

    Ok(repo)
  }

  /// Write a podspec declaring `version` and source `tag`
  pub fn add_podspec(&self, name: &str, version: &str, tag: &str) -> Result<PathBuf> {
    let file = self.path.join(format!("{}.podspec", name));
    std::fs::write(
      &file,
      format!(
        r#"Pod::Spec.new do |s|
  s.name         = "{name}"
  s.version      = "{version}"
  s.summary      = "{name} helpers"
  s.source       = {{ :git => "https://example.com/{name}.git", :tag => "{tag}" }}
  s.source_files = "{name}/**/*.swift"
end
"#
      ),
    )?;
    Ok(file)
  }

  /// Overwrite pod-release.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("pod-release.toml"), content)?;
    Ok(())
  }

  /// Commit everything with a fixed author/committer date
  pub fn commit_at(&self, message: &str, date: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    let output = Command::new("git")
      .current_dir(&self.path)
      .args(["commit", "-m", message])
      .env("GIT_AUTHOR_DATE", date)
      .env("GIT_COMMITTER_DATE", date)
      .output()
      .context("Failed to run git commit")?;
    if !output.status.success() {
      anyhow::bail!("git commit failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a lightweight tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Tags known to the repository at `dir`
  pub fn tags_in(dir: &Path) -> Result<Vec<String>> {
    let output = git(dir, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Subject of the latest commit
  pub fn last_commit_subject(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run pod-release and return its output whatever the exit status
pub fn run_pod_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  run_pod_release_with_env(cwd, args, &[])
}

/// Run pod-release with extra environment variables, whatever the exit status
pub fn run_pod_release_with_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_pod-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .envs(envs.iter().copied())
    .output()
    .context("Failed to run pod-release")
}

/// Run pod-release, failing unless it exits successfully
pub fn run_pod_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_pod_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "pod-release failed: pod-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
