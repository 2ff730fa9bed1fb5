//! Release command implementation
//!
//! One linear pipeline:
//! 1. Read the latest tag and resolve pods, version and message
//! 2. Rewrite each podspec's source tag and version
//! 3. `git add .`, `git commit`, `git tag`, `git push`, `git push --tags`
//! 4. `pod repo push` for each podspec
//!
//! A failed git step stops the run before anything is published. A failed
//! publish does not stop the remaining pods; the run fails at the end.

use crate::core::context::Workspace;
use crate::core::error::{PodError, PodResult};
use crate::core::process;
use crate::core::vcs::SystemGit;
use crate::release::plan::PodPreview;
use crate::release::podspec::{registry_name, set_pod_version, set_repo_tag};
use crate::release::{ReleaseArgs, ReleasePlan};
use serde::Serialize;

/// Flags of the release command
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
  pub args: ReleaseArgs,
  /// Print the plan, change nothing
  pub dry_run: bool,
  /// With `dry_run`, print the plan as JSON
  pub json: bool,
  /// Stop after pushing tags
  pub no_publish: bool,
  /// Don't echo commands and their output
  pub quiet: bool,
}

#[derive(Serialize)]
struct DryRunReport<'a> {
  #[serde(flatten)]
  plan: &'a ReleasePlan,
  changes: Vec<PodPreview>,
}

/// Run the release command
pub fn run_release(ws: &Workspace, opts: &ReleaseOptions) -> PodResult<()> {
  let git = SystemGit::open(ws.root())?;
  let release = &ws.config.release;
  tracing::debug!(root = %ws.root().display(), work_tree = %git.work_tree().display(), "release workspace");

  let current_tag = git.latest_tag(&release.fallback_tag)?;
  let plan = ReleasePlan::resolve(ws, &current_tag, &opts.args)?;
  tracing::info!(tag = %plan.target.tag, pods = plan.pods.len(), "resolved release");

  if opts.dry_run {
    return print_dry_run(ws, &plan, opts.json);
  }

  println!("Pods: {}", plan.pods.join(", "));
  println!(
    "{:<30} {} -> {}",
    format!("{}:", release.label),
    plan.current_tag,
    plan.target.tag
  );

  for pod in &plan.pods {
    let path = ws.root().join(pod);
    set_repo_tag(&path, &plan.target.tag, release.edit)?;
    let (old, new) = set_pod_version(&path, None, release.edit)?;
    println!("{:<30} {} -> {}", format!("{}:", pod), old, new);
  }

  let echo = !opts.quiet;
  git.add_all(echo)?;
  git.commit(&plan.message, echo)?;
  git.create_tag(&plan.target.tag, echo)?;
  git.push(echo)?;
  git.push_tags(echo)?;

  if opts.no_publish {
    println!();
    println!("✅ Tagged and pushed {} (publishing skipped)", plan.target.tag);
    return Ok(());
  }

  let failed = publish_pods(ws, &plan, echo);

  println!();
  if failed.is_empty() {
    println!("🎉 Released {} ({} pod(s) published)", plan.target.tag, plan.pods.len());
    Ok(())
  } else {
    Err(PodError::PublishFailed { pods: failed })
  }
}

/// Arguments of the publish command for one podspec
pub fn publish_args(ws: &Workspace, pod: &str) -> Vec<String> {
  let publish = &ws.config.publish;

  let mut args = publish.args.clone();
  if publish.allow_warnings {
    args.push("--allow-warnings".to_string());
  }
  args.push(registry_name(pod, &publish.repo_suffix));
  args.push(pod.to_string());
  args
}

/// Publish every pod in order, returning the ones that failed
fn publish_pods(ws: &Workspace, plan: &ReleasePlan, echo: bool) -> Vec<String> {
  let program = &ws.config.publish.program;
  let total = plan.pods.len();
  let mut failed = Vec::new();

  for (idx, pod) in plan.pods.iter().enumerate() {
    println!("📌 [{}/{}] {}", idx + 1, total, pod);

    match process::run(ws.root(), program, publish_args(ws, pod), echo) {
      Ok(output) if output.success => {}
      Ok(output) => {
        tracing::warn!(%pod, status = ?output.status, "publish failed");
        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
          eprintln!("{}", stderr);
        }
        failed.push(pod.clone());
      }
      Err(err) => {
        tracing::warn!(%pod, error = %err, "publish could not start");
        eprintln!("{}", err);
        failed.push(pod.clone());
      }
    }
  }

  failed
}

fn print_dry_run(ws: &Workspace, plan: &ReleasePlan, json: bool) -> PodResult<()> {
  let changes = plan.preview(ws)?;

  if json {
    let report = DryRunReport { plan, changes };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!("📦 Release Plan");
  println!();
  println!(
    "  {:<28} {} -> {}",
    format!("{}:", ws.config.release.label),
    plan.current_tag,
    plan.target.tag
  );
  println!("  Message: {}", plan.message);
  println!();
  println!("  Pods:");
  for change in &changes {
    println!(
      "    {:<26} {} -> {}  (tag {} -> {})",
      format!("{}:", change.file),
      change.current_version,
      change.next_version,
      change.current_tag,
      change.next_tag
    );
  }
  println!();
  println!("  Would run:");
  println!("    git add .");
  println!("    git commit -m \"{}\"", plan.message);
  println!("    git tag {}", plan.target.tag);
  println!("    git push");
  println!("    git push --tags");
  for change in &changes {
    println!(
      "    {} {}",
      ws.config.publish.program,
      publish_args(ws, &change.file).join(" ")
    );
  }
  println!();
  println!("🔍 Dry-run mode (no changes applied)");

  Ok(())
}
