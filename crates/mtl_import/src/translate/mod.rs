//! Heuristic translation from MTL records to principled shader trees

pub mod illum;
pub mod resolve;
pub mod scalars;
pub mod translator;

pub use illum::{shading_flags, ShadingFlags};
pub use resolve::{load_texture_image, texture_path_candidates};
pub use scalars::{derive_scalars, PrincipledScalars};
pub use translator::ShaderTreeBuilder;
