//! Version arithmetic for `<major>.<minor>` release strings
//!
//! The major part is opaque and may itself contain dots or a tag prefix
//! (`v1.2.3` splits into `v1.2` and `3`). Only the final segment is bumped.

use crate::core::error::{PodResult, VersionError};
use serde::Serialize;

/// Compute the next version by incrementing the final dot-segment
///
/// `1.2` becomes `1.3`, `2.9` becomes `2.10` (no carry), `v1.2.0` becomes `v1.2.1`.
pub fn next_version(version: &str) -> PodResult<String> {
  let (major, minor) = version.rsplit_once('.').ok_or_else(|| VersionError::NoMinor {
    version: version.to_string(),
  })?;

  let invalid = || VersionError::InvalidMinor {
    version: version.to_string(),
    minor: minor.to_string(),
  };

  if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid().into());
  }
  let minor: u64 = minor.parse().map_err(|_| invalid())?;

  Ok(format!("{}.{}", major, minor + 1))
}

/// A resolved release target
///
/// `tag` names the git tag and the podspec source tag; `version` is the
/// same value without a leading `v`, used in human-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseVersion {
  pub tag: String,
  pub version: String,
}

impl ReleaseVersion {
  pub fn from_tag(tag: impl Into<String>) -> Self {
    let tag = tag.into();
    let version = strip_tag_prefix(&tag).to_string();
    Self { tag, version }
  }
}

/// Drop a leading `v`/`V` when it is followed by a digit
pub fn strip_tag_prefix(tag: &str) -> &str {
  match tag.strip_prefix(['v', 'V']) {
    Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
    _ => tag,
  }
}
