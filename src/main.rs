use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webpack_assets::url_context::{absolute_asset_urls, content_asset_urls};
use webpack_assets::{AssetLoader, AssetSource, AssetsConfig, ContentRoot, RequestUrls};

/// Inspect assets-webpack-plugin manifests the way the web application resolves them.
#[derive(Parser)]
#[command(name = "webpack-assets")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Configuration file listing the manifests to load
  #[arg(short, long, default_value = webpack_assets::config::DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  /// Directory `~/` manifest paths are resolved against (default: current directory)
  #[arg(long)]
  app_root: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the URLs of an entry's assets, one per line
  Urls {
    /// Entry name, e.g. `main`
    entry: String,

    /// Asset type, e.g. `js` or `css`
    asset_type: String,

    /// Print nothing instead of failing when the asset is missing
    #[arg(long)]
    optional: bool,

    /// Make the URLs absolute against this request URL
    #[arg(long)]
    base_url: Option<String>,

    /// Path the application is mounted at, used to expand `~`
    #[arg(long, default_value = "/")]
    app_path: String,
  },

  /// List every resolvable entry with its asset types
  Entries,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let app_root = match cli.app_root {
    Some(root) => root,
    None => std::env::current_dir().context("failed to determine current directory")?,
  };
  let config = AssetsConfig::from_path(&cli.config)
    .with_context(|| format!("failed to load {}", cli.config.display()))?;
  let (sources, options) = config.into_parts();

  let loader = AssetLoader::new(ContentRoot::new(app_root));
  loader.initialize(sources, options)?;

  match cli.command {
    Commands::Urls {
      entry,
      asset_type,
      optional,
      base_url,
      app_path,
    } => {
      let required = !optional;
      let urls = match base_url {
        Some(base_url) => {
          let context = RequestUrls::parse(&base_url)?.with_application_path(app_path);
          absolute_asset_urls(&loader, &context, &entry, &asset_type, required)?
        }
        None if app_path != "/" => {
          let context = RequestUrls::parse("http://localhost/")?.with_application_path(app_path);
          content_asset_urls(&loader, &context, &entry, &asset_type, required)?
        }
        None => loader.asset_urls(&entry, &asset_type, required)?,
      };
      for url in urls {
        println!("{url}");
      }
    }
    Commands::Entries => {
      let registry = loader.current()?;
      for (name, manifest) in registry.entries() {
        let types = manifest
          .entry(name)
          .map(|entry| entry.asset_types().collect::<Vec<_>>().join(", "))
          .unwrap_or_default();
        println!("{name}\t{types}");
      }
    }
  }

  Ok(())
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("WEBPACK_ASSETS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level)),
    )
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}
