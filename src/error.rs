//! Error types shared by the manifest parser, registry, resolver and loader.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssetsError>;

/// Errors raised while loading manifests or resolving assets.
#[derive(Debug, Error)]
pub enum AssetsError {
  /// Required configuration is missing or malformed.
  #[error("invalid configuration: {0}")]
  Configuration(String),

  /// The configured manifest path does not point at an existing file.
  #[error("manifest not found at {}", path.display())]
  ManifestNotFound {
    /// Resolved filesystem path of the manifest.
    path: PathBuf,
  },

  /// The manifest exists but could not be read.
  #[error("failed to read manifest {}: {source}", path.display())]
  ManifestUnreadable {
    /// Resolved filesystem path of the manifest.
    path: PathBuf,
    /// Underlying I/O error.
    source: std::io::Error,
  },

  /// The manifest is not valid JSON or does not have the expected shape.
  #[error("failed to parse manifest{}: {source}", display_path(path))]
  ManifestParse {
    /// Manifest path, or `None` when parsing an in-memory document.
    path: Option<PathBuf>,
    /// Underlying JSON error.
    source: serde_json::Error,
  },

  /// No registered manifest resolves the requested entry and asset type.
  #[error("asset '{name}' with type '{asset_type}' could not be found")]
  AssetNotFound {
    /// Requested entry name.
    name: String,
    /// Requested asset type.
    asset_type: String,
  },

  /// Loader operations were invoked out of order.
  #[error(transparent)]
  Lifecycle(#[from] LifecycleError),

  /// A resolved asset could not be turned into an absolute URL.
  #[error("invalid asset url '{url}': {source}")]
  InvalidUrl {
    /// The URL that failed to parse or join.
    url: String,
    /// Underlying parse error.
    source: url::ParseError,
  },
}

/// Programming errors in the loader lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
  /// A query or reload happened before `initialize`.
  #[error("asset loader has not been initialized")]
  NotInitialized,
  /// `initialize` was called more than once.
  #[error("asset loader has already been initialized")]
  AlreadyInitialized,
}

impl AssetsError {
  pub(crate) fn asset_not_found(name: &str, asset_type: &str) -> Self {
    Self::AssetNotFound {
      name: name.to_string(),
      asset_type: asset_type.to_string(),
    }
  }

  /// Returns `true` for the caller-facing "asset missing" condition.
  pub fn is_asset_not_found(&self) -> bool {
    matches!(self, Self::AssetNotFound { .. })
  }
}

fn display_path(path: &Option<PathBuf>) -> String {
  match path {
    Some(path) => format!(" {}", path.display()),
    None => String::new(),
  }
}
