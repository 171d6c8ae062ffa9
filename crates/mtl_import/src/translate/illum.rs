//! Illumination model decoding
//!
//! The MTL `illum` code selects which shading effects a material intends to
//! use. The mapping to flags is a fixed lookup table so the policy stays
//! auditable in one place; see
//! <https://wikipedia.org/wiki/Wavefront_.obj_file> for the code meanings.

use bitflags::bitflags;

bitflags! {
    /// Shading effects derived from the illumination model code
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShadingFlags: u8 {
        /// Specular highlight enabled
        const HIGHLIGHT = 1 << 0;
        /// Reflection enabled
        const REFLECTION = 1 << 1;
        /// Transparency enabled
        const TRANSPARENCY = 1 << 2;
        /// Glass-like transparency (drives the refractive-index fallback)
        const GLASS = 1 << 3;
    }
}

/// Flag tuples for illumination codes 1 through 9
const ILLUM_FLAGS: [ShadingFlags; 9] = [
    // 1: base color on, ambient on
    ShadingFlags::empty(),
    // 2: highlight on
    ShadingFlags::HIGHLIGHT,
    // 3: reflection on, ray trace on
    ShadingFlags::REFLECTION,
    // 4: transparency glass on, reflection ray trace on
    ShadingFlags::REFLECTION
        .union(ShadingFlags::TRANSPARENCY)
        .union(ShadingFlags::GLASS),
    // 5: reflection fresnel on, ray trace on
    ShadingFlags::REFLECTION,
    // 6: transparency refraction on, reflection fresnel off, ray trace on
    ShadingFlags::REFLECTION.union(ShadingFlags::TRANSPARENCY),
    // 7: transparency refraction on, reflection fresnel on, ray trace on
    ShadingFlags::REFLECTION.union(ShadingFlags::TRANSPARENCY),
    // 8: reflection on, ray trace off
    ShadingFlags::REFLECTION,
    // 9: transparency glass on, reflection ray trace off
    ShadingFlags::TRANSPARENCY.union(ShadingFlags::GLASS),
];

/// Decode an illumination model code into shading flags
///
/// Codes outside 1-9 are not supported by the principled shading model;
/// they are logged and leave every flag unset.
pub fn shading_flags(illum: i32) -> ShadingFlags {
    match illum {
        1..=9 => ILLUM_FLAGS[(illum - 1) as usize],
        other => {
            log::warn!(
                "illum value {} is not supported by the principled shader",
                other
            );
            ShadingFlags::empty()
        }
    }
}
