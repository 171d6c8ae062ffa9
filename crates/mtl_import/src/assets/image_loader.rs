//! Image loading utilities for texture data
//!
//! Provides PNG, JPEG, and other image format loading for texture-map
//! resolution, plus the [`ImageLoader`] capability trait the translator
//! probes candidate paths through.

use std::path::Path;

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (typically 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        // Load image using the image crate
        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image: {}", e)))?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4, // RGBA
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if image dimensions are power of two (useful for mipmaps)
    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }
}

/// Capability to resolve a file path string into loaded image data
///
/// One candidate path per call; the translator drives the candidate search
/// and treats any error as "this candidate did not resolve".
pub trait ImageLoader {
    /// Load the image at `path`, or report why it cannot be loaded
    fn load(&mut self, path: &str) -> Result<ImageData, AssetError>;
}

/// Filesystem-backed image loader
#[derive(Debug, Default)]
pub struct FsImageLoader;

impl FsImageLoader {
    /// Create a new filesystem loader
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&mut self, path: &str) -> Result<ImageData, AssetError> {
        if !Path::new(path).is_file() {
            return Err(AssetError::NotFound(path.to_string()));
        }
        ImageData::from_file(path)
    }
}

/// Image loader that refuses every path
///
/// Used when image loading is disabled; the translator then skips every
/// texture map and still produces a complete scalar-only graph.
#[derive(Debug, Default)]
pub struct NullImageLoader;

impl NullImageLoader {
    /// Create a new null loader
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for NullImageLoader {
    fn load(&mut self, path: &str) -> Result<ImageData, AssetError> {
        Err(AssetError::NotFound(path.to_string()))
    }
}
