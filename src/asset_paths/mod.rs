//! Helpers for turning manifest-relative asset URLs into deployable URLs.
//!
//! Joining a root prefix onto a fragment and detecting URLs that already carry a scheme are
//! kept in separate submodules so each rule can be tested on its own.

mod filters;
mod join;

pub use filters::is_absolute_url;
pub use join::{join_root, resolve_asset_url};
