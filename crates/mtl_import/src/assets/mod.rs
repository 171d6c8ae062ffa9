//! Asset loading for the importer
//!
//! The only asset class this crate loads is texture images referenced from
//! MTL files. Loading goes through the [`ImageLoader`] trait so hosts can
//! substitute their own resolution strategy (or none at all).

pub mod image_loader;

pub use image_loader::{FsImageLoader, ImageData, ImageLoader, NullImageLoader};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
