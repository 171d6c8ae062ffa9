//! # MTL Import
//!
//! A Wavefront MTL material importer that maps the legacy Phong material
//! model onto principled BSDF shader node graphs.
//!
//! ## Features
//!
//! - **MTL Parsing**: Phong colors, scalars, illumination models, and
//!   texture maps with placement options
//! - **Heuristic Translation**: table-driven illumination decoding and
//!   Phong-to-PBR scalar conversion with per-field fallbacks
//! - **Shader Graphs**: a typed, fixed-schema node graph with
//!   deterministic layout
//! - **Texture Resolution**: forgiving multi-candidate image path probing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mtl_import::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let importer = MtlImporter::new();
//!     let mut loader = FsImageLoader::new();
//!
//!     for material in importer.load_all("assets/scene.mtl", &mut loader)? {
//!         let tree = material.node_tree.as_ref().unwrap();
//!         println!("{}: {} nodes", material.name, tree.node_count());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod graph;
pub mod importer;
pub mod material;
pub mod mtl;
pub mod translate;

pub use assets::{AssetError, FsImageLoader, ImageData, ImageLoader, NullImageLoader};
pub use config::{Config, ConfigError, ImportConfig};
pub use importer::{ImportError, MtlImporter};
pub use material::{BlendMethod, Material};
pub use mtl::{MtlError, MtlMaterial, MtlParser, TexMapKind, TextureMap};
pub use translate::ShaderTreeBuilder;

/// Commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::assets::{FsImageLoader, ImageLoader, NullImageLoader};
    pub use crate::config::{Config, ImportConfig};
    pub use crate::foundation::math::Vec3;
    pub use crate::graph::{NodeKind, ShaderTree};
    pub use crate::importer::{ImportError, MtlImporter};
    pub use crate::material::{BlendMethod, Material};
    pub use crate::mtl::{MtlMaterial, MtlParser, TexMapKind};
    pub use crate::translate::ShaderTreeBuilder;
}
