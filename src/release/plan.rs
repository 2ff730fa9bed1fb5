//! Release planning: resolve which podspecs, which version, which message
//!
//! Resolution never touches the working tree. The only external call is the
//! read-only `git tag` listing behind the current tag.

use crate::core::context::Workspace;
use crate::core::error::{PodError, PodResult};
use crate::release::podspec::{self, find_spec_files};
use crate::release::version::{ReleaseVersion, next_version};
use serde::Serialize;
use std::collections::HashMap;

/// `--pods` value selecting every podspec in the working directory
pub const ALL_PODS: &str = "all";

/// Raw release options as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseArgs {
  pub pods: Vec<String>,
  pub version: Option<String>,
  pub message: Option<String>,
}

/// Fully resolved release
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
  /// Latest tag before this release (or the configured fallback)
  pub current_tag: String,
  /// Podspec file names, relative to the workspace root
  pub pods: Vec<String>,
  pub target: ReleaseVersion,
  pub message: String,
}

/// What a release would do to one podspec
#[derive(Debug, Clone, Serialize)]
pub struct PodPreview {
  pub file: String,
  pub current_version: String,
  pub next_version: String,
  pub current_tag: String,
  pub next_tag: String,
  pub registry: String,
}

impl ReleasePlan {
  /// Resolve pods, target version and commit message
  ///
  /// `current_tag` is the latest tag, read once by the caller and reused
  /// both for display and for deriving the default version.
  pub fn resolve(ws: &Workspace, current_tag: &str, args: &ReleaseArgs) -> PodResult<Self> {
    let pods = resolve_pods(ws, &args.pods)?;

    let target = match &args.version {
      Some(version) => ReleaseVersion::from_tag(version.clone()),
      None => ReleaseVersion::from_tag(next_version(current_tag)?),
    };

    let message = match &args.message {
      Some(message) => message.clone(),
      None => ws.config.release.render_message(&target.version),
    };

    Ok(Self {
      current_tag: current_tag.to_string(),
      pods,
      target,
      message,
    })
  }

  /// Read each podspec and report the changes a release would make
  ///
  /// One entry per occurrence in `pods`. A podspec listed twice is edited
  /// twice by a real run, so its second entry starts from the first one's
  /// result.
  pub fn preview(&self, ws: &Workspace) -> PodResult<Vec<PodPreview>> {
    let mut edited: HashMap<&str, String> = HashMap::new();
    let mut changes = Vec::with_capacity(self.pods.len());

    for file in &self.pods {
      let path = ws.root().join(file);
      let (current_version, current_tag) = match edited.get(file.as_str()) {
        Some(version) => (version.clone(), self.target.tag.clone()),
        None => (
          podspec::current_pod_version(&path)?,
          podspec::current_source_tag(&path)?,
        ),
      };
      let next = next_version(&current_version)?;
      edited.insert(file, next.clone());

      changes.push(PodPreview {
        file: file.clone(),
        current_version,
        next_version: next,
        current_tag,
        next_tag: self.target.tag.clone(),
        registry: podspec::registry_name(file, &ws.config.publish.repo_suffix),
      });
    }

    Ok(changes)
  }
}

/// Expand `--pods` values into podspec file names
///
/// The `all` sentinel (or no value) selects every podspec. Otherwise each
/// value is a case-insensitive name filter; results are concatenated in
/// argument order without deduplication.
pub fn resolve_pods(ws: &Workspace, filters: &[String]) -> PodResult<Vec<String>> {
  let extension = &ws.config.release.extension;

  let pods = if is_all(filters) {
    find_spec_files(ws.root(), extension, None)?
  } else {
    let mut pods = Vec::new();
    for filter in filters {
      let matched = find_spec_files(ws.root(), extension, Some(filter))?;
      tracing::debug!(%filter, ?matched, "resolved pod filter");
      pods.extend(matched);
    }
    pods
  };

  if pods.is_empty() {
    let filters = if is_all(filters) { Vec::new() } else { filters.to_vec() };
    return Err(PodError::NoPodsMatched { filters });
  }

  Ok(pods)
}

fn is_all(filters: &[String]) -> bool {
  filters.is_empty() || (filters.len() == 1 && filters[0] == ALL_PODS)
}
