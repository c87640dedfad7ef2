//! Lifecycle of the shared manifest registry: initialize once, build lazily, reload on demand.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use arc_swap::ArcSwapOption;
use tracing::{info, warn};

use crate::config::ManifestSource;
use crate::content_root::PathResolver;
use crate::error::{LifecycleError, Result};
use crate::registry::Registry;
use crate::resolver::AssetSource;

/// Loader-wide options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
  /// Rebuild the registry from disk on every [`AssetLoader::current`] call.
  pub disable_caching: bool,
}

struct LoaderState {
  sources: Vec<ManifestSource>,
  uncached: bool,
  current: ArcSwapOption<Registry>,
  build_lock: Mutex<()>,
}

impl LoaderState {
  fn lock(&self) -> MutexGuard<'_, ()> {
    self.build_lock.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Owner of the registry snapshot shared by request handlers.
///
/// The host constructs exactly one loader and hands out references to it. Manifests are not
/// read (and the path resolver is not consulted) until the first [`AssetLoader::current`]
/// call. Readers always observe a complete registry: rebuilds publish a new snapshot with a
/// single atomic swap and never block readers of the previous one.
pub struct AssetLoader<P> {
  paths: P,
  state: OnceLock<LoaderState>,
}

impl<P: PathResolver> AssetLoader<P> {
  /// Create an uninitialized loader resolving manifest paths through `paths`.
  pub fn new(paths: P) -> Self {
    Self {
      paths,
      state: OnceLock::new(),
    }
  }

  /// Record the manifest sources. Fails when called a second time.
  pub fn initialize(&self, sources: Vec<ManifestSource>, options: LoaderOptions) -> Result<()> {
    let uncached = options.disable_caching || sources.iter().any(|source| source.disable_caching);
    let state = LoaderState {
      sources,
      uncached,
      current: ArcSwapOption::empty(),
      build_lock: Mutex::new(()),
    };
    self
      .state
      .set(state)
      .map_err(|_| LifecycleError::AlreadyInitialized)?;
    Ok(())
  }

  /// Whether [`AssetLoader::initialize`] has been called.
  pub fn is_initialized(&self) -> bool {
    self.state.get().is_some()
  }

  /// The registry to query.
  ///
  /// Builds it on first use. With caching disabled every call re-reads the manifests so edits
  /// made by a running watcher are picked up immediately.
  pub fn current(&self) -> Result<Arc<Registry>> {
    let state = self.state()?;
    if state.uncached {
      return self.rebuild(state, "uncached");
    }

    if let Some(registry) = state.current.load_full() {
      return Ok(registry);
    }

    let _guard = state.lock();
    if let Some(registry) = state.current.load_full() {
      return Ok(registry);
    }
    self.publish(state, "initial")
  }

  /// Re-read every manifest and replace the current snapshot.
  ///
  /// Waits for a build already in flight, so the snapshot it publishes is never older than
  /// the files this call read. Readers keep using the previous snapshot meanwhile. When the
  /// rebuild fails the previous snapshot stays in place and the error is returned.
  pub fn reload(&self) -> Result<Arc<Registry>> {
    let state = self.state()?;
    self.rebuild(state, "reload").inspect_err(|err| {
      if state.current.load().is_some() {
        warn!(error = %err, "manifest reload failed, keeping previous registry");
      }
    })
  }

  fn state(&self) -> Result<&LoaderState> {
    Ok(self.state.get().ok_or(LifecycleError::NotInitialized)?)
  }

  fn rebuild(&self, state: &LoaderState, reason: &'static str) -> Result<Arc<Registry>> {
    let _guard = state.lock();
    self.publish(state, reason)
  }

  /// Build from disk and store the result. Callers hold `build_lock`.
  fn publish(&self, state: &LoaderState, reason: &'static str) -> Result<Arc<Registry>> {
    let registry = Arc::new(Registry::build(&state.sources, &self.paths)?);
    state.current.store(Some(Arc::clone(&registry)));
    info!(manifests = registry.len(), reason, "published asset registry");
    Ok(registry)
  }
}

impl<P: PathResolver> AssetSource for AssetLoader<P> {
  fn asset_urls(&self, name: &str, asset_type: &str, required: bool) -> Result<Vec<String>> {
    self.current()?.asset_urls(name, asset_type, required)
  }
}

impl<P: std::fmt::Debug> std::fmt::Debug for AssetLoader<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AssetLoader")
      .field("paths", &self.paths)
      .field("initialized", &self.state.get().is_some())
      .finish()
  }
}
