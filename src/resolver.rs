//! Resolving `(entry, asset type)` pairs into final URLs.

use crate::asset_paths::resolve_asset_url;
use crate::error::{AssetsError, Result};
use crate::registry::Registry;

/// Query surface used by view code to find the URLs of an entry's assets.
///
/// When `required` is `true` an unresolvable asset is an [`AssetsError::AssetNotFound`]
/// error. When it is `false` the same condition yields an empty list. An unknown entry, an
/// entry declared as `null` and an entry without the requested type are all treated alike.
pub trait AssetSource {
  /// URLs for every file of `asset_type` produced for entry `name`, in manifest order.
  fn asset_urls(&self, name: &str, asset_type: &str, required: bool) -> Result<Vec<String>>;

  /// First URL of [`AssetSource::asset_urls`].
  ///
  /// Kept for callers written before entries could produce several files; prefer
  /// `asset_urls`, which does not silently drop the remaining files.
  #[deprecated(note = "entries can produce several files; use `asset_urls`")]
  fn asset_url(&self, name: &str, asset_type: &str, required: bool) -> Result<Option<String>> {
    let first = self
      .asset_urls(name, asset_type, required)?
      .into_iter()
      .next();
    if required && first.is_none() {
      return Err(AssetsError::asset_not_found(name, asset_type));
    }
    Ok(first)
  }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
  fn asset_urls(&self, name: &str, asset_type: &str, required: bool) -> Result<Vec<String>> {
    (**self).asset_urls(name, asset_type, required)
  }
}

impl<T: AssetSource + ?Sized> AssetSource for std::sync::Arc<T> {
  fn asset_urls(&self, name: &str, asset_type: &str, required: bool) -> Result<Vec<String>> {
    (**self).asset_urls(name, asset_type, required)
  }
}

impl Registry {
  fn resolve(&self, name: &str, asset_type: &str) -> Option<Vec<String>> {
    let manifest = self.lookup(name)?;
    let urls = manifest.entry(name)?.urls(asset_type)?;
    Some(
      urls
        .iter()
        .map(|fragment| resolve_asset_url(manifest.root(), fragment))
        .collect(),
    )
  }
}

impl AssetSource for Registry {
  fn asset_urls(&self, name: &str, asset_type: &str, required: bool) -> Result<Vec<String>> {
    match self.resolve(name, asset_type) {
      Some(urls) => Ok(urls),
      None if required => Err(AssetsError::asset_not_found(name, asset_type)),
      None => Ok(Vec::new()),
    }
  }
}
