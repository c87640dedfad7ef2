//! Ordered collection of manifests with first-match entry lookup.

use std::collections::BTreeSet;

use crate::config::ManifestSource;
use crate::content_root::PathResolver;
use crate::error::Result;
use crate::manifest::load_manifest;
use crate::models::Manifest;

/// Immutable snapshot of every configured manifest, in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
  manifests: Vec<Manifest>,
}

impl Registry {
  /// Wrap already-loaded manifests. Order determines lookup precedence.
  pub fn new(manifests: Vec<Manifest>) -> Self {
    Self { manifests }
  }

  /// Load every source in order, tagging each manifest with the source's root prefix.
  pub fn build<P: PathResolver>(sources: &[ManifestSource], paths: &P) -> Result<Self> {
    let manifests = sources
      .iter()
      .map(|source| -> Result<Manifest> {
        source.validate()?;
        let path = paths.resolve(&source.manifest_path)?;
        Ok(load_manifest(&path)?.with_root(source.output_root_path.as_deref()))
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self::new(manifests))
  }

  /// The first manifest declaring `name`, even when its value is `null`.
  ///
  /// Later manifests are never consulted once a manifest declares the entry, so two manifests
  /// cannot contribute asset types to the same entry.
  pub fn lookup(&self, name: &str) -> Option<&Manifest> {
    self
      .manifests
      .iter()
      .find(|manifest| manifest.contains_entry(name))
  }

  /// Manifests in lookup order.
  pub fn manifests(&self) -> &[Manifest] {
    &self.manifests
  }

  /// Entry names that can be resolved, each paired with the manifest that owns it.
  pub fn entries(&self) -> Vec<(&str, &Manifest)> {
    let mut seen = BTreeSet::new();
    let mut result = Vec::new();
    for manifest in &self.manifests {
      for name in manifest.entry_names() {
        if seen.insert(name) {
          result.push((name, manifest));
        }
      }
    }
    result
  }

  /// Number of manifests in the registry.
  pub fn len(&self) -> usize {
    self.manifests.len()
  }

  /// Returns `true` when no manifests are registered.
  pub fn is_empty(&self) -> bool {
    self.manifests.is_empty()
  }
}
