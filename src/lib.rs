#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod content_root;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod url_context;

pub use config::{AssetsConfig, ManifestSource};
pub use content_root::{ContentRoot, PathResolver};
pub use error::{AssetsError, LifecycleError, Result};
pub use loader::{AssetLoader, LoaderOptions};
pub use models::{AssetEntry, AssetUrls, Manifest};
pub use registry::Registry;
pub use resolver::AssetSource;
pub use url_context::{RequestUrls, UrlContext};
