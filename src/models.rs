//! Data structures describing a parsed assets manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Ordered list of relative URLs produced for one asset type of an entry.
///
/// Manifests declare either a single string or an array of strings for each asset type;
/// both shapes deserialise into the same list so callers never have to care which style the
/// build produced. A JSON `null` becomes an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetUrls(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum AssetUrlsRecord {
  Many(Vec<String>),
  One(String),
  Null(()),
}

impl<'de> Deserialize<'de> for AssetUrls {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    match AssetUrlsRecord::deserialize(deserializer)? {
      AssetUrlsRecord::Many(urls) => Ok(Self(urls)),
      AssetUrlsRecord::One(url) => Ok(Self(vec![url])),
      AssetUrlsRecord::Null(()) => Ok(Self::default()),
    }
  }
}

impl AssetUrls {
  /// Relative URLs in declaration order.
  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  /// Returns `true` when the manifest declared no URLs for this type.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterate over the relative URLs in declaration order.
  pub fn iter(&self) -> std::slice::Iter<'_, String> {
    self.0.iter()
  }
}

impl From<Vec<String>> for AssetUrls {
  fn from(urls: Vec<String>) -> Self {
    Self(urls)
  }
}

impl<'a> IntoIterator for &'a AssetUrls {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Asset types declared for one manifest entry, e.g. `js` and `css`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AssetEntry {
  types: BTreeMap<String, AssetUrls>,
}

impl AssetEntry {
  /// URLs for the asset type, or `None` when the type is absent or declared empty.
  pub fn urls(&self, asset_type: &str) -> Option<&AssetUrls> {
    self.types.get(asset_type).filter(|urls| !urls.is_empty())
  }

  /// Asset types declared by the entry, sorted.
  pub fn asset_types(&self) -> impl Iterator<Item = &str> {
    self.types.keys().map(String::as_str)
  }

  /// Add or replace the URLs for an asset type.
  pub fn insert(&mut self, asset_type: impl Into<String>, urls: impl Into<AssetUrls>) {
    self.types.insert(asset_type.into(), urls.into());
  }
}

/// Parsed assets manifest tagged with the root prefix of the source it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
  entries: BTreeMap<String, Option<AssetEntry>>,
  root: Option<String>,
}

impl Manifest {
  /// Build a manifest from already-parsed entries.
  pub fn from_entries(entries: BTreeMap<String, Option<AssetEntry>>) -> Self {
    Self {
      entries,
      root: None,
    }
  }

  /// Attach the root prefix applied to relative URLs. Blank prefixes are dropped.
  pub fn with_root(mut self, root: Option<impl Into<String>>) -> Self {
    self.root = root.map(Into::into).filter(|value| !value.trim().is_empty());
    self
  }

  /// Root prefix for relative URLs, if any.
  pub fn root(&self) -> Option<&str> {
    self.root.as_deref()
  }

  /// Whether the entry name is declared, even with a `null` value.
  pub fn contains_entry(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  /// The entry's asset types, or `None` when the entry is missing or `null`.
  pub fn entry(&self, name: &str) -> Option<&AssetEntry> {
    self.entries.get(name).and_then(Option::as_ref)
  }

  /// Entry names declared by the manifest, sorted.
  pub fn entry_names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Number of declared entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the manifest declares no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
