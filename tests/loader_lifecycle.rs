use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Barrier;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use tempfile::{TempDir, tempdir};
use webpack_assets::url_context::absolute_asset_urls;
use webpack_assets::{
  AssetLoader, AssetSource, AssetsConfig, AssetsError, ContentRoot, LoaderOptions,
  ManifestSource, PathResolver, RequestUrls, Result,
};

/// Resolver that counts how often the loader asks for a manifest path.
struct CountingResolver {
  inner: ContentRoot,
  calls: AtomicUsize,
}

impl CountingResolver {
  fn new(root: &Path) -> Self {
    Self {
      inner: ContentRoot::new(root),
      calls: AtomicUsize::new(0),
    }
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl PathResolver for CountingResolver {
  fn resolve(&self, manifest_path: &str) -> Result<PathBuf> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.inner.resolve(manifest_path)
  }
}

/// Resolver that parks the first lookup of `held` until the test lets it continue.
struct GatedResolver {
  inner: ContentRoot,
  held: &'static str,
  armed: AtomicBool,
  gate: Barrier,
}

impl GatedResolver {
  fn new(root: &Path, held: &'static str) -> Self {
    Self {
      inner: ContentRoot::new(root),
      held,
      armed: AtomicBool::new(true),
      gate: Barrier::new(2),
    }
  }

  /// Rendezvous with the parked lookup: once to see it arrive, once to release it.
  fn rendezvous(&self) {
    self.gate.wait();
  }
}

impl PathResolver for GatedResolver {
  fn resolve(&self, manifest_path: &str) -> Result<PathBuf> {
    if manifest_path == self.held && self.armed.swap(false, Ordering::SeqCst) {
      self.gate.wait();
      self.gate.wait();
    }
    self.inner.resolve(manifest_path)
  }
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) {
  fs::write(dir.path().join(name), content).expect("failed to write manifest");
}

#[test]
fn manifests_are_loaded_lazily() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "manifest.json", r#"{ "file": { "js": "file.js" } }"#);

  let resolver = CountingResolver::new(temp.path());
  let loader = AssetLoader::new(&resolver);
  loader.initialize(
    vec![ManifestSource::new("~/manifest.json").with_output_root("~/dist")],
    LoaderOptions::default(),
  )?;
  assert_eq!(resolver.calls(), 0);

  assert_eq!(loader.asset_urls("file", "js", true)?, vec!["~/dist/file.js"]);
  assert_eq!(resolver.calls(), 1);

  loader.asset_urls("file", "js", true)?;
  assert_eq!(resolver.calls(), 1);
  Ok(())
}

#[test]
fn reload_picks_up_changed_manifests() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "manifest.json", r#"{ "main": { "js": "main.aaaa.js" } }"#);

  let loader = AssetLoader::new(ContentRoot::new(temp.path()));
  loader.initialize(vec![ManifestSource::new("manifest.json")], LoaderOptions::default())?;
  let before = loader.current()?;
  assert_eq!(before.asset_urls("main", "js", true)?, vec!["main.aaaa.js"]);

  write_manifest(&temp, "manifest.json", r#"{ "main": { "js": ["main.bbbb.js", "extra.js"] } }"#);
  assert_eq!(loader.asset_urls("main", "js", true)?, vec!["main.aaaa.js"]);

  loader.reload()?;
  assert_eq!(loader.asset_urls("main", "js", true)?, vec!["main.bbbb.js", "extra.js"]);

  // Snapshots handed out earlier stay intact.
  assert_eq!(before.asset_urls("main", "js", true)?, vec!["main.aaaa.js"]);
  Ok(())
}

#[test]
fn reload_during_first_build_wins() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "a.json", r#"{ "main": { "js": "old.js" } }"#);
  write_manifest(&temp, "b.json", r#"{ "vendor": { "js": "vendor.js" } }"#);

  let resolver = GatedResolver::new(temp.path(), "b.json");
  let loader = AssetLoader::new(&resolver);
  loader.initialize(
    vec![ManifestSource::new("a.json"), ManifestSource::new("b.json")],
    LoaderOptions::default(),
  )?;

  thread::scope(|scope| -> Result<()> {
    let first = scope.spawn(|| loader.current());

    // The first build has read `a.json` and is parked before `b.json`.
    resolver.rendezvous();
    write_manifest(&temp, "a.json", r#"{ "main": { "js": "new.js" } }"#);
    let reload = scope.spawn(|| loader.reload());
    thread::sleep(Duration::from_millis(50));
    resolver.rendezvous();

    first.join().expect("first build panicked")?;
    let reloaded = reload.join().expect("reload panicked")?;
    assert_eq!(reloaded.asset_urls("main", "js", true)?, vec!["new.js"]);
    Ok(())
  })?;

  assert_eq!(loader.asset_urls("main", "js", true)?, vec!["new.js"]);
  Ok(())
}

#[test]
fn disabled_caching_rereads_every_lookup() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "manifest.json", r#"{ "main": { "css": "one.css" } }"#);

  let resolver = CountingResolver::new(temp.path());
  let loader = AssetLoader::new(&resolver);
  loader.initialize(
    vec![ManifestSource::new("manifest.json")],
    LoaderOptions {
      disable_caching: true,
    },
  )?;

  assert_eq!(loader.asset_urls("main", "css", true)?, vec!["one.css"]);
  write_manifest(&temp, "manifest.json", r#"{ "main": { "css": "two.css" } }"#);
  assert_eq!(loader.asset_urls("main", "css", true)?, vec!["two.css"]);
  assert_eq!(resolver.calls(), 2);
  Ok(())
}

#[test]
fn per_source_flag_disables_caching() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "app.json", r#"{ "main": { "js": "one.js" } }"#);
  write_manifest(&temp, "vendor.json", r#"{ "vendor": { "js": "react.js" } }"#);

  let loader = AssetLoader::new(ContentRoot::new(temp.path()));
  loader.initialize(
    vec![
      ManifestSource::new("app.json").uncached(),
      ManifestSource::new("vendor.json").with_output_root("https://cdn.example.com/"),
    ],
    LoaderOptions::default(),
  )?;

  assert_eq!(loader.asset_urls("main", "js", true)?, vec!["one.js"]);
  write_manifest(&temp, "app.json", r#"{ "main": { "js": "two.js" } }"#);
  assert_eq!(loader.asset_urls("main", "js", true)?, vec!["two.js"]);
  assert_eq!(loader.asset_urls("vendor", "js", true)?, vec![
    "https://cdn.example.com/react.js"
  ]);
  Ok(())
}

#[test]
fn concurrent_first_access_builds_once() -> Result<()> {
  let temp = tempdir().unwrap();
  write_manifest(&temp, "manifest.json", r#"{ "main": { "js": "main.js" } }"#);

  let resolver = CountingResolver::new(temp.path());
  let loader = AssetLoader::new(&resolver);
  loader.initialize(vec![ManifestSource::new("manifest.json")], LoaderOptions::default())?;

  thread::scope(|scope| {
    let handles: Vec<_> = (0..8)
      .map(|_| scope.spawn(|| loader.asset_urls("main", "js", true)))
      .collect();
    for handle in handles {
      let urls = handle.join().expect("lookup thread panicked");
      assert_eq!(urls.unwrap(), vec!["main.js"]);
    }
  });

  assert_eq!(resolver.calls(), 1);
  Ok(())
}

#[test]
fn configuration_file_drives_resolution() -> Result<()> {
  let temp = tempdir().unwrap();
  fs::create_dir_all(temp.path().join("scripts")).unwrap();
  write_manifest(&temp, "scripts/manifest1.json", r#"{ "code": { "js": "file.1.js" } }"#);
  write_manifest(&temp, "scripts/manifest2.json", r#"{ "code": { "css": "file.2.css" }, "style": { "css": "file.2.css" } }"#);
  write_manifest(
    &temp,
    "assets.config.json",
    r#"{
      "manifests": [
        { "manifestPath": "~/scripts/manifest1.json", "outputRootPath": "~/dist/1" },
        { "manifestPath": "~/scripts/manifest2.json", "outputRootPath": "~/dist/2/" }
      ]
    }"#,
  );

  let (sources, options) = AssetsConfig::discover(temp.path())?.into_parts();
  let loader = AssetLoader::new(ContentRoot::new(temp.path()));
  loader.initialize(sources, options)?;

  let context = RequestUrls::parse("https://example.com/checkout")?;
  assert_eq!(absolute_asset_urls(&loader, &context, "code", "js", true)?, vec![
    "https://example.com/dist/1/file.1.js"
  ]);
  assert_eq!(absolute_asset_urls(&loader, &context, "style", "css", true)?, vec![
    "https://example.com/dist/2/file.2.css"
  ]);

  // `code` belongs to the first manifest, which has no stylesheet.
  assert!(absolute_asset_urls(&loader, &context, "code", "css", false)?.is_empty());
  assert!(matches!(
    loader.asset_urls("code", "css", true),
    Err(AssetsError::AssetNotFound { .. })
  ));
  Ok(())
}

#[test]
fn missing_manifest_surfaces_on_first_lookup() {
  let temp = tempdir().unwrap();
  let loader = AssetLoader::new(ContentRoot::new(temp.path()));
  loader
    .initialize(vec![ManifestSource::new("~/missing.json")], LoaderOptions::default())
    .unwrap();

  let err = loader.asset_urls("main", "js", false).unwrap_err();
  assert!(matches!(err, AssetsError::ManifestNotFound { .. }));
}
