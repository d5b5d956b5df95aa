#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod manifest;
pub mod mapper;
pub mod models;
pub mod registry;
pub mod scanning;
pub mod tags;

pub use config::AssetMapperConfig;
pub use error::{AssetError, Result};
pub use manifest::{ManifestConfig, ManifestKind};
pub use mapper::AssetMapper;
pub use models::{Asset, AssetKind, Entry};
pub use registry::Registry;
