//! Podspec discovery and in-place editing
//!
//! A podspec is treated as opaque text. Two declarations are pattern-matched:
//! `s.version = "X"` and the source `:tag => "X"`. Single or double quotes,
//! flexible whitespace around `=` / `=>`, case-sensitive.

use crate::core::config::EditMode;
use crate::core::error::{PodResult, ResultExt, SpecError};
use crate::release::version::next_version;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"[.]version\s*?=\s*?['"]([^'"]+)['"]"#).expect("version pattern compiles"));

static TAG_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#":tag\s*?=>\s*?['"]([^'"]+)['"]"#).expect("tag pattern compiles"));

/// List podspec file names in `dir`
///
/// Keeps regular files whose name contains `extension`. With `containing`,
/// keeps only names that contain it case-insensitively. Sorted by name.
pub fn find_spec_files(dir: &Path, extension: &str, containing: Option<&str>) -> PodResult<Vec<String>> {
  let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.contains(extension) {
      names.push(name);
    }
  }
  names.sort();

  Ok(filter_spec_names(names, containing))
}

/// Apply the case-insensitive name filter
fn filter_spec_names(names: Vec<String>, containing: Option<&str>) -> Vec<String> {
  match containing {
    Some(needle) => {
      let needle = needle.to_lowercase();
      names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
    }
    None => names,
  }
}

/// Declared `s.version` of a podspec
pub fn current_pod_version(file: &Path) -> PodResult<String> {
  let content = read_spec(file)?;
  Ok(capture(&VERSION_PATTERN, &content, file, "version")?.1)
}

/// Declared source `:tag` of a podspec
pub fn current_source_tag(file: &Path) -> PodResult<String> {
  let content = read_spec(file)?;
  Ok(capture(&TAG_PATTERN, &content, file, "tag")?.1)
}

/// Rewrite the podspec version, returning `(old, new)`
///
/// Without `next`, the new version is the declared one with its minor bumped.
pub fn set_pod_version(file: &Path, next: Option<&str>, mode: EditMode) -> PodResult<(String, String)> {
  let content = read_spec(file)?;
  let (span, old) = capture(&VERSION_PATTERN, &content, file, "version")?;
  let new = match next {
    Some(v) => v.to_string(),
    None => next_version(&old)?,
  };

  write_spec(file, &rewrite(&content, span, &old, &new, mode))?;
  tracing::debug!(file = %file.display(), %old, %new, ?mode, "rewrote version");

  Ok((old, new))
}

/// Rewrite the podspec source tag to `next_tag`
pub fn set_repo_tag(file: &Path, next_tag: &str, mode: EditMode) -> PodResult<()> {
  let content = read_spec(file)?;
  let (span, old) = capture(&TAG_PATTERN, &content, file, "tag")?;

  write_spec(file, &rewrite(&content, span, &old, next_tag, mode))?;
  tracing::debug!(file = %file.display(), %old, new = next_tag, ?mode, "rewrote source tag");

  Ok(())
}

/// Spec repository name for `pod repo push`: file name up to the first dot, plus `suffix`
pub fn registry_name(file_name: &str, suffix: &str) -> String {
  let base = file_name.split('.').next().unwrap_or(file_name);
  format!("{}{}", base, suffix)
}

fn read_spec(file: &Path) -> PodResult<String> {
  fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn write_spec(file: &Path, content: &str) -> PodResult<()> {
  fs::write(file, content).with_context(|| format!("Failed to write {}", file.display()))
}

/// First match of `pattern`: byte span of the captured value and the value itself
fn capture(
  pattern: &Regex,
  content: &str,
  file: &Path,
  field: &'static str,
) -> PodResult<(std::ops::Range<usize>, String)> {
  let value = pattern
    .captures(content)
    .and_then(|caps| caps.get(1))
    .ok_or_else(|| SpecError::FieldNotFound {
      file: file.to_path_buf(),
      field,
    })?;

  Ok((value.range(), value.as_str().to_string()))
}

fn rewrite(content: &str, span: std::ops::Range<usize>, old: &str, new: &str, mode: EditMode) -> String {
  match mode {
    EditMode::Field => {
      let mut out = String::with_capacity(content.len() + new.len());
      out.push_str(&content[..span.start]);
      out.push_str(new);
      out.push_str(&content[span.end..]);
      out
    }
    EditMode::Literal => content.replace(old, new),
  }
}
