//! Math utilities and types
//!
//! Provides the fundamental math types used by the material model and the
//! shader graph (colors and placement transforms are plain float vectors).

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type, also used for RGB color triples
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Componentwise mean of a color triple
pub fn mean(v: &Vec3) -> f32 {
    (v.x + v.y + v.z) / 3.0
}
