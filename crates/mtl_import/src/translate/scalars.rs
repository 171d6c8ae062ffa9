//! Phong-to-principled scalar conversion
//!
//! Approximations for mapping the MTL material model onto a principled
//! BSDF. Every scalar has an "unset" fallback driven by the shading flags;
//! the fallbacks are applied in a fixed sequence and some are deliberately
//! asymmetric (see the metallic and refractive-index rules below).

use crate::foundation::math::{mean, Vec3};
use crate::mtl::MtlMaterial;
use crate::translate::illum::ShadingFlags;

/// Scalar socket values for the principled node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipledScalars {
    /// Specular intensity, mean of Ks
    pub specular: f32,
    /// Surface roughness derived from the specular exponent
    pub roughness: f32,
    /// Metallic factor derived from the ambient color
    pub metallic: f32,
    /// Index of refraction
    pub ior: f32,
    /// Opacity
    pub alpha: f32,
    /// Base color, Kd clamped to non-negative components
    pub base_color: Vec3,
    /// Emission color, Ke clamped to non-negative components
    pub emission_color: Vec3,
}

/// Derive principled scalar values from an MTL record and its shading flags
pub fn derive_scalars(mtl: &MtlMaterial, flags: ShadingFlags) -> PrincipledScalars {
    // Specular: average of Ks components.
    let mut specular = mean(&mtl.specular);
    // Roughness: map the 0..1000 exponent range to 1..0 with a non-linearity.
    let clamped_ns = mtl.specular_exponent.clamp(0.0, 1000.0);
    let mut roughness = 1.0 - (clamped_ns / 1000.0).sqrt();
    // Metallic: average of Ka components.
    let mut metallic = mean(&mtl.ambient);
    let mut ior = mtl.ior;
    let mut alpha = mtl.dissolve;

    if specular < 0.0 {
        specular = if flags.contains(ShadingFlags::HIGHLIGHT) {
            1.0
        } else {
            0.0
        };
    }
    if mtl.specular_exponent < 0.0 {
        roughness = if flags.contains(ShadingFlags::HIGHLIGHT) {
            0.0
        } else {
            1.0
        };
    }
    // A present ambient color always maps to a dielectric; only the
    // unset-ambient reflection fallback can make a material metallic.
    if metallic < 0.0 {
        metallic = if flags.contains(ShadingFlags::REFLECTION) {
            1.0
        } else {
            0.0
        };
    } else {
        metallic = 0.0;
    }
    // Transparency first, then glass; both are checked independently so
    // glass overrides when a material carries both flags.
    if ior < 0.0 {
        if flags.contains(ShadingFlags::TRANSPARENCY) {
            ior = 1.0;
        }
        if flags.contains(ShadingFlags::GLASS) {
            ior = 1.5;
        }
    }
    if alpha < 0.0 && flags.contains(ShadingFlags::TRANSPARENCY) {
        alpha = 1.0;
    }

    PrincipledScalars {
        specular,
        roughness,
        metallic,
        ior,
        alpha,
        base_color: mtl.diffuse.map(|c| c.max(0.0)),
        emission_color: mtl.emission.map(|c| c.max(0.0)),
    }
}
