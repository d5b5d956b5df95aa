use std::path::PathBuf;

use anyhow::{Context, Result};
use asset_mapper::{
    Asset, AssetKind, AssetMapper, AssetMapperConfig, Entry, ManifestConfig, ManifestKind,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Resolve static assets to versioned public paths and render HTML tags.
#[derive(Debug, Parser)]
#[command(name = "asset-mapper", version, about)]
struct Cli {
    /// JSON configuration file; defaults to `asset-mapper.json` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Public path prefix, overriding the configuration.
    #[arg(long, global = true)]
    prefix: Option<String>,
    /// Content hash length, overriding the configuration. Zero disables hashing.
    #[arg(long, global = true)]
    hash_length: Option<usize>,
    /// Directory to scan; may be repeated.
    #[arg(long = "scan", global = true)]
    scan: Vec<PathBuf>,
    /// Manifest to load; may be repeated.
    #[arg(long = "manifest", global = true)]
    manifest: Vec<PathBuf>,
    /// Dialect of the manifests given with `--manifest`.
    #[arg(long, global = true, default_value = "vite")]
    manifest_type: ManifestKind,
    /// Append webpack output filenames to the public prefix.
    #[arg(long, global = true)]
    webpack_append_output: bool,
    /// Log every registered asset.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the public path of each asset.
    Resolve {
        /// Source or public paths to resolve.
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print a `<script>` tag.
    Script {
        /// Asset path.
        path: String,
        /// Extra attributes as `key value` pairs.
        attrs: Vec<String>,
    },
    /// Print a stylesheet `<link>` tag.
    Link {
        /// Asset path.
        path: String,
        /// Extra attributes as `key value` pairs.
        attrs: Vec<String>,
    },
    /// Print the link and script tags of a manifest entry.
    Entry {
        /// Entry name.
        name: String,
    },
    /// List every registered asset.
    List {
        /// Print assets and entries as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Listing<'a> {
    assets: Vec<ListedAsset<'a>>,
    entries: Vec<ListedEntry<'a>>,
}

#[derive(Serialize)]
struct ListedAsset<'a> {
    #[serde(flatten)]
    asset: &'a Asset,
    kind: AssetKind,
}

#[derive(Serialize)]
struct ListedEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    entry: &'a Entry,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let mapper = AssetMapper::from_config(config).context("failed to load assets")?;

    match &cli.command {
        Command::Resolve { paths } => {
            for path in paths {
                println!("{}", mapper.get(path));
            }
        }
        Command::Script { path, attrs } => {
            println!("{}", mapper.script_tag(path, attrs.as_slice())?);
        }
        Command::Link { path, attrs } => {
            println!("{}", mapper.link_tag(path, attrs.as_slice())?);
        }
        Command::Entry { name } => {
            const NO_ATTRS: &[&str] = &[];
            for tag in mapper.css_link_tags_from_entry(name, NO_ATTRS)? {
                println!("{tag}");
            }
            for tag in mapper.js_script_tags_from_entry(name, NO_ATTRS)? {
                println!("{tag}");
            }
        }
        Command::List { json: true } => println!("{}", listing_json(&mapper)?),
        Command::List { json: false } => {
            for asset in mapper.registry().assets() {
                println!("{} -> {}", asset.source_path(), asset.public_path());
            }
        }
    }

    Ok(())
}

fn listing_json(mapper: &AssetMapper) -> Result<String> {
    let registry = mapper.registry();
    let listing = Listing {
        assets: registry
            .assets()
            .iter()
            .map(|asset| ListedAsset {
                asset,
                kind: asset.kind(),
            })
            .collect(),
        entries: registry
            .entry_names()
            .filter_map(|name| registry.entry(name).map(|entry| ListedEntry { name, entry }))
            .collect(),
    };
    serde_json::to_string_pretty(&listing).context("failed to serialize asset listing")
}

fn load_config(cli: &Cli) -> Result<AssetMapperConfig> {
    let mut config = match &cli.config {
        Some(path) => AssetMapperConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            AssetMapperConfig::discover(&cwd)
        }
    };

    if let Some(prefix) = &cli.prefix {
        config.public_path_prefix = prefix.clone();
    }
    if let Some(hash_length) = cli.hash_length {
        config.hash_length = hash_length;
    }
    config.webpack_append_output |= cli.webpack_append_output;
    config.scan_dirs.extend(cli.scan.iter().cloned());
    config
        .manifests
        .extend(cli.manifest.iter().map(|path| ManifestConfig {
            path: path.clone(),
            kind: cli.manifest_type,
        }));

    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "asset_mapper=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_serializes_assets_and_entries() -> Result<()> {
        let mut mapper = AssetMapper::new();
        let registry = mapper.registry_mut();
        registry.add(Asset::scanned("/", "style.css", "123"), false);
        registry.create_entry("app").add_script("/app.js");

        let value: serde_json::Value = serde_json::from_str(&listing_json(&mapper)?)?;

        assert_eq!(
            value["assets"][0],
            serde_json::json!({
                "sourcePath": "style.css",
                "publicPath": "/style.css?v=123",
                "hash": "123",
                "kind": "stylesheet"
            })
        );
        assert_eq!(
            value["entries"][0],
            serde_json::json!({ "name": "app", "stylesheets": [], "scripts": ["/app.js"] })
        );
        Ok(())
    }
}
