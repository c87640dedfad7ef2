//! Mapping application-relative manifest paths onto the filesystem.

use std::path::{Path, PathBuf};

use crate::error::{AssetsError, Result};

/// Service translating a configured manifest path into a filesystem path.
///
/// Hosts typically map `~/scripts/webpack-assets.json` relative to the directory the
/// application is served from.
pub trait PathResolver {
  /// Resolve `manifest_path` to a path that can be opened.
  fn resolve(&self, manifest_path: &str) -> Result<PathBuf>;
}

impl<T: PathResolver + ?Sized> PathResolver for &T {
  fn resolve(&self, manifest_path: &str) -> Result<PathBuf> {
    (**self).resolve(manifest_path)
  }
}

/// Resolves manifest paths against an application root directory.
///
/// `~/x` and other relative paths resolve under the root, a bare `~` is the root itself and
/// absolute filesystem paths are used as-is.
#[derive(Debug, Clone)]
pub struct ContentRoot {
  root: PathBuf,
}

impl ContentRoot {
  /// Resolve manifest paths under `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// The application root directory.
  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl PathResolver for ContentRoot {
  fn resolve(&self, manifest_path: &str) -> Result<PathBuf> {
    let trimmed = manifest_path.trim();
    if trimmed.is_empty() {
      return Err(AssetsError::Configuration(
        "cannot resolve an empty manifest path".into(),
      ));
    }

    let app_relative = trimmed
      .strip_prefix('~')
      .filter(|rest| rest.is_empty() || rest.starts_with(['/', '\\']));
    if let Some(rest) = app_relative {
      let relative = rest.trim_start_matches(['/', '\\']);
      return Ok(if relative.is_empty() {
        self.root.clone()
      } else {
        self.root.join(relative)
      });
    }

    let path = Path::new(trimmed);
    if path.is_absolute() {
      Ok(path.to_path_buf())
    } else {
      Ok(self.root.join(path))
    }
  }
}
