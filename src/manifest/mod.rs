//! Reading assets-webpack-plugin manifests from disk or memory.

mod parsing;

pub use parsing::{load_manifest, parse_manifest};
