//! Turning resolved asset URLs into URLs a browser can fetch.
//!
//! Manifest roots are usually application-relative (`~/scripts`). A [`UrlContext`] expands
//! them against the path the application is mounted at and, when asked, against the URL of
//! the request being served.

use url::Url;

use crate::error::{AssetsError, Result};
use crate::resolver::AssetSource;

/// Request-scoped URL composition used by view helpers.
pub trait UrlContext {
  /// Expand a leading `~/` (or a bare `~`) into the application path; other URLs are
  /// returned unchanged.
  fn content(&self, path: &str) -> String;

  /// Absolute URL for `path`, resolved against the current request.
  fn absolute(&self, path: &str) -> Result<String>;
}

/// [`UrlContext`] for an application mounted at `application_path`, serving `request_url`.
#[derive(Debug, Clone)]
pub struct RequestUrls {
  application_path: String,
  request_url: Url,
}

impl RequestUrls {
  /// Context for an application mounted at `/` serving `request_url`.
  pub fn new(request_url: Url) -> Self {
    Self {
      application_path: "/".to_string(),
      request_url,
    }
  }

  /// Parse `request_url` and build a context for it.
  pub fn parse(request_url: &str) -> Result<Self> {
    let url = Url::parse(request_url).map_err(|source| AssetsError::InvalidUrl {
      url: request_url.to_string(),
      source,
    })?;
    Ok(Self::new(url))
  }

  /// Mount the application below `application_path`, e.g. `/shop`.
  pub fn with_application_path(mut self, application_path: impl Into<String>) -> Self {
    let path = application_path.into();
    let trimmed = path.trim_matches('/');
    self.application_path = if trimmed.is_empty() {
      "/".to_string()
    } else {
      format!("/{trimmed}/")
    };
    self
  }
}

impl UrlContext for RequestUrls {
  fn content(&self, path: &str) -> String {
    if path == "~" {
      return self.application_path.clone();
    }
    match path.strip_prefix("~/") {
      Some(rest) => format!("{}{}", self.application_path, rest.trim_start_matches('/')),
      None => path.to_string(),
    }
  }

  fn absolute(&self, path: &str) -> Result<String> {
    let content = self.content(path);
    self
      .request_url
      .join(&content)
      .map(String::from)
      .map_err(|source| AssetsError::InvalidUrl {
        url: content,
        source,
      })
  }
}

/// [`AssetSource::asset_urls`] with `~` expanded against the application path.
pub fn content_asset_urls(
  assets: &impl AssetSource,
  urls: &impl UrlContext,
  name: &str,
  asset_type: &str,
  required: bool,
) -> Result<Vec<String>> {
  Ok(
    assets
      .asset_urls(name, asset_type, required)?
      .iter()
      .map(|url| urls.content(url))
      .collect(),
  )
}

/// [`AssetSource::asset_urls`] as absolute URLs for the current request.
pub fn absolute_asset_urls(
  assets: &impl AssetSource,
  urls: &impl UrlContext,
  name: &str,
  asset_type: &str,
  required: bool,
) -> Result<Vec<String>> {
  assets
    .asset_urls(name, asset_type, required)?
    .iter()
    .map(|url| urls.absolute(url))
    .collect()
}

/// First URL of [`content_asset_urls`].
#[deprecated(note = "entries can produce several files; use `content_asset_urls`")]
pub fn content_asset_url(
  assets: &impl AssetSource,
  urls: &impl UrlContext,
  name: &str,
  asset_type: &str,
  required: bool,
) -> Result<Option<String>> {
  #[allow(deprecated)]
  let url = assets.asset_url(name, asset_type, required)?;
  Ok(url.map(|url| urls.content(&url)))
}

/// First URL of [`absolute_asset_urls`].
#[deprecated(note = "entries can produce several files; use `absolute_asset_urls`")]
pub fn absolute_asset_url(
  assets: &impl AssetSource,
  urls: &impl UrlContext,
  name: &str,
  asset_type: &str,
  required: bool,
) -> Result<Option<String>> {
  #[allow(deprecated)]
  let url = assets.asset_url(name, asset_type, required)?;
  url.map(|url| urls.absolute(&url)).transpose()
}
