//! Texture image path resolution
//!
//! MTL files reference images with paths that are frequently wrong in
//! predictable ways: relative to the MTL file, absolute, wrapped in quotes,
//! or with spaces flattened to underscores by some exporter. Resolution
//! tries a fixed candidate sequence and takes the first image that loads.

use crate::assets::{ImageData, ImageLoader};
use crate::mtl::TextureMap;

/// Candidate paths for a texture image, in probe order
///
/// 1. base directory + image path, concatenated literally;
/// 2. the raw image path (absolute or cwd-relative);
/// 3. candidate 1 with every double-quote character removed, when that
///    changes it;
/// 4. candidate 3 with underscores replaced by spaces, when that differs
///    from both earlier spellings of the relative candidate.
pub fn texture_path_candidates(dir: &str, image_path: &str) -> Vec<String> {
    let relative = format!("{dir}{image_path}");
    let raw = image_path.to_string();

    let mut candidates = vec![relative.clone(), raw];

    let no_quote: String = relative.chars().filter(|&c| c != '"').collect();
    if no_quote != relative {
        candidates.push(no_quote.clone());
    }

    let no_underscore = no_quote.replace('_', " ");
    if no_underscore != no_quote && no_underscore != relative {
        candidates.push(no_underscore);
    }

    candidates
}

/// Resolve and load the image for a texture map
///
/// Tries every candidate in order, logging each attempt; returns the first
/// image that loads, or `None` when every candidate fails.
pub fn load_texture_image(
    loader: &mut dyn ImageLoader,
    tex_map: &TextureMap,
) -> Option<ImageData> {
    for path in texture_path_candidates(&tex_map.mtl_dir, &tex_map.image_path) {
        log::debug!("Trying texture image path: '{}'", path);
        match loader.load(&path) {
            Ok(image) => {
                log::info!("Loaded texture image from: '{}'", path);
                return Some(image);
            }
            Err(err) => {
                log::info!("Cannot load texture image '{}': {}", path, err);
            }
        }
    }
    None
}
