//! Parsed MTL material data (Wavefront Phong model)
//!
//! Color and scalar fields use a negative sentinel for "not present in the
//! file"; the translator decides the fallback per field, so the parser never
//! substitutes defaults of its own.

use std::collections::HashMap;

use crate::foundation::math::Vec3;

/// Texture map channels understood by the importer
///
/// Each channel knows the MTL keyword(s) that introduce it and the input
/// socket on the principled node its texture output is wired into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TexMapKind {
    /// Base color texture (`map_Kd`)
    Diffuse,
    /// Ambient texture, used as a metallic proxy (`map_Ka`)
    Ambient,
    /// Specular texture (`map_Ks`)
    Specular,
    /// Specular exponent texture, used as roughness (`map_Ns`)
    SpecularExponent,
    /// Opacity texture (`map_d`)
    Alpha,
    /// Reflection texture, used as a metallic proxy (`refl`, `map_refl`)
    Reflection,
    /// Emission texture (`map_Ke`)
    Emission,
    /// Bump or normal texture (`map_Bump`, `bump`)
    Bump,
}

impl TexMapKind {
    /// All map kinds in declaration order
    ///
    /// Translation iterates this list so node layout is deterministic.
    pub const ALL: [Self; 8] = [
        Self::Diffuse,
        Self::Ambient,
        Self::Specular,
        Self::SpecularExponent,
        Self::Alpha,
        Self::Reflection,
        Self::Emission,
        Self::Bump,
    ];

    /// Map an MTL directive keyword to its texture channel
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "map_Kd" => Some(Self::Diffuse),
            "map_Ka" => Some(Self::Ambient),
            "map_Ks" => Some(Self::Specular),
            "map_Ns" => Some(Self::SpecularExponent),
            "map_d" => Some(Self::Alpha),
            "refl" | "map_refl" => Some(Self::Reflection),
            "map_Ke" => Some(Self::Emission),
            "map_Bump" | "bump" => Some(Self::Bump),
            _ => None,
        }
    }

    /// Destination input socket on the principled node
    pub fn dest_socket(self) -> &'static str {
        match self {
            Self::Diffuse => "Base Color",
            Self::Ambient | Self::Reflection => "Metallic",
            Self::Specular => "Specular",
            Self::SpecularExponent => "Roughness",
            Self::Alpha => "Alpha",
            Self::Emission => "Emission",
            Self::Bump => "Normal",
        }
    }
}

/// One texture map reference from a material definition
#[derive(Debug, Clone)]
pub struct TextureMap {
    /// Texture channel this map feeds
    pub kind: TexMapKind,
    /// Image path as written in the file (may be empty, may contain spaces)
    pub image_path: String,
    /// Directory of the MTL file, trailing separator included; prepended
    /// verbatim when probing relative candidates
    pub mtl_dir: String,
    /// UV translation from the `-o` option
    pub translation: Vec3,
    /// UV scale from the `-s` option
    pub scale: Vec3,
}

impl TextureMap {
    /// Create an empty map entry for a channel
    pub fn new(kind: TexMapKind) -> Self {
        Self {
            kind,
            image_path: String::new(),
            mtl_dir: String::new(),
            translation: Vec3::new(0.0, 0.0, 0.0),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// True when the `-o`/`-s` options deviate from the identity placement
    pub fn has_transform(&self) -> bool {
        self.translation != Vec3::new(0.0, 0.0, 0.0) || self.scale != Vec3::new(1.0, 1.0, 1.0)
    }
}

/// Parsed MTL material data
#[derive(Debug, Clone)]
pub struct MtlMaterial {
    /// Material name
    pub name: String,
    /// Ambient color (Ka); negative components = unset
    pub ambient: Vec3,
    /// Diffuse color (Kd) - becomes base color; negative components = unset
    pub diffuse: Vec3,
    /// Specular color (Ks); negative components = unset
    pub specular: Vec3,
    /// Emission color (Ke); negative components = unset
    pub emission: Vec3,
    /// Specular exponent (Ns), nominal range 0 to 1000; negative = unset
    pub specular_exponent: f32,
    /// Index of refraction (Ni); negative = unset
    pub ior: f32,
    /// Dissolve/opacity (d) - 0.0 = transparent, 1.0 = opaque; negative = unset
    pub dissolve: f32,
    /// Illumination model (illum); only 1-9 are supported downstream
    pub illum: i32,
    /// Bump map strength from the `-bm` option; negative = unset
    pub normal_strength: f32,
    /// Texture maps, keyed by channel; an entry exists iff its directive
    /// appeared in the file
    pub texture_maps: HashMap<TexMapKind, TextureMap>,
}

impl Default for MtlMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(-1.0, -1.0, -1.0),
            diffuse: Vec3::new(-1.0, -1.0, -1.0),
            specular: Vec3::new(-1.0, -1.0, -1.0),
            emission: Vec3::new(-1.0, -1.0, -1.0),
            specular_exponent: -1.0,
            ior: -1.0,
            dissolve: -1.0,
            illum: -1,
            normal_strength: -1.0,
            texture_maps: HashMap::new(),
        }
    }
}
