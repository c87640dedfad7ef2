//! Configuration describing which manifests to load and how to prefix their URLs.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{AssetsError, Result};
use crate::loader::LoaderOptions;

/// Default configuration file searched for by [`AssetsConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "assets.config.json";

/// One manifest location together with the prefix applied to its URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestSource {
  /// Application-relative path to the JSON written by assets-webpack-plugin,
  /// e.g. `~/scripts/webpack-assets.json`.
  pub manifest_path: String,
  /// Prefix for relative URLs in the manifest, e.g. `~/scripts` or a CDN origin.
  #[serde(default)]
  pub output_root_path: Option<String>,
  /// Re-read the manifest on every lookup. Useful while a watcher rewrites it.
  #[serde(default)]
  pub disable_caching: bool,
}

impl ManifestSource {
  /// Source for `manifest_path` without a root prefix.
  pub fn new(manifest_path: impl Into<String>) -> Self {
    Self {
      manifest_path: manifest_path.into(),
      ..Self::default()
    }
  }

  /// Set the root prefix applied to relative URLs.
  pub fn with_output_root(mut self, root: impl Into<String>) -> Self {
    self.output_root_path = Some(root.into());
    self
  }

  /// Re-read this manifest on every lookup.
  pub fn uncached(mut self) -> Self {
    self.disable_caching = true;
    self
  }

  pub(crate) fn validate(&self) -> Result<()> {
    if self.manifest_path.trim().is_empty() {
      return Err(AssetsError::Configuration(
        "manifest source is missing a manifestPath".into(),
      ));
    }
    Ok(())
  }
}

/// Ordered manifest sources plus loader-wide options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetsConfig {
  /// Manifests in lookup order; the first one declaring an entry wins.
  pub manifests: Vec<ManifestSource>,
  /// Re-read every manifest on every lookup.
  pub disable_caching: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssetsConfigRecord {
  List(Vec<ManifestSource>),
  Table(AssetsConfigTable),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AssetsConfigTable {
  #[serde(default)]
  manifests: Vec<ManifestSource>,
  #[serde(default)]
  disable_caching: bool,
}

impl<'de> Deserialize<'de> for AssetsConfig {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    match AssetsConfigRecord::deserialize(deserializer)? {
      AssetsConfigRecord::List(manifests) => Ok(Self {
        manifests,
        disable_caching: false,
      }),
      AssetsConfigRecord::Table(AssetsConfigTable {
        manifests,
        disable_caching,
      }) => Ok(Self {
        manifests,
        disable_caching,
      }),
    }
  }
}

impl AssetsConfig {
  /// Load [`DEFAULT_CONFIG_FILE`] from `dir`.
  ///
  /// A missing file yields an empty configuration; read and parse failures are reported.
  pub fn discover(dir: &Path) -> Result<Self> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Err(AssetsError::Configuration(_)) if !candidate.exists() => Ok(Self::default()),
      other => other,
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| {
      let reason = if err.kind() == ErrorKind::NotFound {
        "file not found".to_string()
      } else {
        err.to_string()
      };
      AssetsError::Configuration(format!("failed to read {}: {reason}", path.display()))
    })?;
    Self::from_json(&content)
      .map_err(|err| AssetsError::Configuration(format!("{}: {err}", path.display())))
  }

  /// Parse configuration from a JSON document.
  pub fn from_json(document: &str) -> Result<Self> {
    let config: Self = serde_json::from_str(document)
      .map_err(|err| AssetsError::Configuration(format!("malformed configuration: {err}")))?;
    for source in &config.manifests {
      source.validate()?;
    }
    Ok(config)
  }

  /// Loader options derived from the configuration.
  pub fn options(&self) -> LoaderOptions {
    LoaderOptions {
      disable_caching: self.disable_caching,
    }
  }

  /// Split into the pieces expected by [`crate::AssetLoader::initialize`].
  pub fn into_parts(self) -> (Vec<ManifestSource>, LoaderOptions) {
    let options = self.options();
    (self.manifests, options)
  }
}
