//! JSON decoding of `{ "<entry>": { "<type>": "<url>" | ["<url>", ...] } }` documents.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{AssetsError, Result};
use crate::models::{AssetEntry, Manifest};

type ManifestRecord = BTreeMap<String, Option<AssetEntry>>;

/// Parse a manifest document held in memory.
///
/// The returned manifest has no root prefix; callers attach one with [`Manifest::with_root`].
pub fn parse_manifest(document: &str) -> Result<Manifest> {
  let entries: ManifestRecord = serde_json::from_str(document)
    .map_err(|source| AssetsError::ManifestParse { path: None, source })?;
  Ok(Manifest::from_entries(entries))
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
  let content = fs::read_to_string(path).map_err(|err| match err.kind() {
    ErrorKind::NotFound => AssetsError::ManifestNotFound {
      path: path.to_path_buf(),
    },
    _ => AssetsError::ManifestUnreadable {
      path: path.to_path_buf(),
      source: err,
    },
  })?;

  let entries: ManifestRecord =
    serde_json::from_str(&content).map_err(|source| AssetsError::ManifestParse {
      path: Some(path.to_path_buf()),
      source,
    })?;

  debug!(path = %path.display(), entries = entries.len(), "loaded assets manifest");
  Ok(Manifest::from_entries(entries))
}
