//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into structured data for material
//! translation. Supports standard Phong lighting properties and the common
//! texture maps with their `-o`/`-s`/`-bm` placement options.

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::mtl::material::{MtlMaterial, TexMapKind, TextureMap};

/// MTL parse errors, carrying the 1-based source line
#[derive(Error, Debug)]
pub enum MtlError {
    /// A directive is missing its value tokens
    #[error("Line {line}: {directive} missing value")]
    MissingValue {
        /// 1-based line number
        line: usize,
        /// Offending directive keyword
        directive: String,
    },

    /// A value token did not parse as a float
    #[error("Line {line}: {directive} invalid float value '{value}'")]
    InvalidFloat {
        /// 1-based line number
        line: usize,
        /// Offending directive keyword
        directive: String,
        /// The token that failed to parse
        value: String,
    },

    /// A value token did not parse as an integer
    #[error("Line {line}: {directive} invalid integer value '{value}'")]
    InvalidInt {
        /// 1-based line number
        line: usize,
        /// Offending directive keyword
        directive: String,
        /// The token that failed to parse
        value: String,
    },

    /// `newmtl` without a material name
    #[error("Line {line}: newmtl missing material name")]
    MissingName {
        /// 1-based line number
        line: usize,
    },
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into the materials it defines
    ///
    /// Materials are returned in definition order. `mtl_dir` is the
    /// directory of the MTL file (trailing separator included) and is
    /// recorded on every texture map for relative-path probing.
    pub fn parse(contents: &str, mtl_dir: &str) -> Result<Vec<MtlMaterial>, MtlError> {
        let mut materials: Vec<MtlMaterial> = Vec::new();
        let mut current_material: Option<MtlMaterial> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            let line_num = line_num + 1;

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let command = match tokens.next() {
                Some(cmd) => cmd,
                None => continue,
            };

            match command {
                "newmtl" => {
                    // Save previous material if exists
                    if let Some(mat) = current_material.take() {
                        Self::finish_material(&mut materials, mat);
                    }

                    // Start new material
                    let name = tokens
                        .next()
                        .ok_or(MtlError::MissingName { line: line_num })?
                        .to_string();
                    current_material = Some(MtlMaterial {
                        name,
                        ..Default::default()
                    });
                }

                "Ka" => {
                    if let Some(ref mut mat) = current_material {
                        mat.ambient = Self::parse_vec3(&mut tokens, line_num, "Ka")?;
                    }
                }

                "Kd" => {
                    if let Some(ref mut mat) = current_material {
                        mat.diffuse = Self::parse_vec3(&mut tokens, line_num, "Kd")?;
                    }
                }

                "Ks" => {
                    if let Some(ref mut mat) = current_material {
                        mat.specular = Self::parse_vec3(&mut tokens, line_num, "Ks")?;
                    }
                }

                "Ke" => {
                    if let Some(ref mut mat) = current_material {
                        mat.emission = Self::parse_vec3(&mut tokens, line_num, "Ke")?;
                    }
                }

                "Ns" => {
                    if let Some(ref mut mat) = current_material {
                        mat.specular_exponent = Self::parse_f32(&mut tokens, line_num, "Ns")?;
                    }
                }

                "Ni" => {
                    if let Some(ref mut mat) = current_material {
                        mat.ior = Self::parse_f32(&mut tokens, line_num, "Ni")?;
                    }
                }

                "d" => {
                    if let Some(ref mut mat) = current_material {
                        mat.dissolve = Self::parse_f32(&mut tokens, line_num, "d")?;
                    }
                }

                "Tr" => {
                    // Transparency (inverted dissolve): Tr = 1.0 - d
                    if let Some(ref mut mat) = current_material {
                        let transparency = Self::parse_f32(&mut tokens, line_num, "Tr")?;
                        mat.dissolve = 1.0 - transparency;
                    }
                }

                "illum" => {
                    if let Some(ref mut mat) = current_material {
                        mat.illum = Self::parse_i32(&mut tokens, line_num, "illum")?;
                    }
                }

                other => {
                    if let Some(kind) = TexMapKind::from_keyword(other) {
                        if let Some(ref mut mat) = current_material {
                            let map = Self::parse_texture_map(
                                mat, kind, tokens, mtl_dir, line_num, other,
                            )?;
                            mat.texture_maps.insert(kind, map);
                        }
                    }
                    // Ignore unknown commands silently
                }
            }
        }

        // Save final material
        if let Some(mat) = current_material {
            Self::finish_material(&mut materials, mat);
        }

        Ok(materials)
    }

    /// Append a finished material; a repeated name replaces the earlier
    /// definition (last one wins)
    fn finish_material(materials: &mut Vec<MtlMaterial>, mat: MtlMaterial) {
        if let Some(existing) = materials.iter_mut().find(|m| m.name == mat.name) {
            log::warn!("Material '{}' redefined, keeping the later definition", mat.name);
            *existing = mat;
        } else {
            materials.push(mat);
        }
    }

    /// Parse a texture map directive: `[options] path with spaces`
    ///
    /// Options handled: `-o u [v [w]]` (translation), `-s u [v [w]]`
    /// (scale), `-bm s` (bump strength, stored on the material). Other
    /// single-argument MTL options are skipped. The path may be empty; an
    /// entry is still recorded so downstream logic can see the directive
    /// was present.
    fn parse_texture_map<'a, I>(
        mat: &mut MtlMaterial,
        kind: TexMapKind,
        tokens: I,
        mtl_dir: &str,
        line_num: usize,
        directive: &str,
    ) -> Result<TextureMap, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let tokens: Vec<&str> = tokens.collect();
        let mut map = TextureMap::new(kind);
        map.mtl_dir = mtl_dir.to_string();

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                "-o" => {
                    let (value, used) =
                        Self::parse_float_run(&tokens[i + 1..], 0.0, line_num, directive)?;
                    map.translation = value;
                    i += 1 + used;
                }
                "-s" => {
                    let (value, used) =
                        Self::parse_float_run(&tokens[i + 1..], 1.0, line_num, directive)?;
                    map.scale = value;
                    i += 1 + used;
                }
                "-bm" => {
                    let token = tokens.get(i + 1).ok_or_else(|| MtlError::MissingValue {
                        line: line_num,
                        directive: directive.to_string(),
                    })?;
                    mat.normal_strength =
                        token.parse::<f32>().map_err(|_| MtlError::InvalidFloat {
                            line: line_num,
                            directive: directive.to_string(),
                            value: (*token).to_string(),
                        })?;
                    i += 2;
                }
                "-t" => {
                    // Turbulence, unused; same up-to-three-floats shape
                    let (_, used) =
                        Self::parse_float_run(&tokens[i + 1..], 0.0, line_num, directive)?;
                    i += 1 + used;
                }
                "-mm" => i += 3,
                "-blendu" | "-blendv" | "-clamp" | "-imfchan" | "-texres" | "-type"
                | "-boost" => i += 2,
                opt if opt.starts_with('-') => {
                    log::warn!("Line {}: {} unknown option '{}'", line_num, directive, opt);
                    i += 1;
                }
                _ => {
                    // Remaining tokens form the image path (paths may
                    // contain spaces)
                    map.image_path = tokens[i..].join(" ");
                    break;
                }
            }
        }

        Ok(map)
    }

    /// Parse one to three floats, padding missing components with `fill`
    fn parse_float_run(
        tokens: &[&str],
        fill: f32,
        line_num: usize,
        directive: &str,
    ) -> Result<(Vec3, usize), MtlError> {
        let mut components = [fill; 3];
        let mut used = 0;
        while used < 3 {
            match tokens.get(used).and_then(|t| t.parse::<f32>().ok()) {
                Some(v) => {
                    components[used] = v;
                    used += 1;
                }
                None => break,
            }
        }
        if used == 0 {
            return Err(MtlError::MissingValue {
                line: line_num,
                directive: directive.to_string(),
            });
        }
        Ok((Vec3::new(components[0], components[1], components[2]), used))
    }

    /// Parse a Vec3 color from RGB tokens
    fn parse_vec3<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Vec3, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = tokens.next().ok_or_else(|| MtlError::MissingValue {
            line: line_num,
            directive: command.to_string(),
        })?;
        token.parse::<f32>().map_err(|_| MtlError::InvalidFloat {
            line: line_num,
            directive: command.to_string(),
            value: token.to_string(),
        })
    }

    /// Parse a single i32 value
    fn parse_i32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<i32, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = tokens.next().ok_or_else(|| MtlError::MissingValue {
            line: line_num,
            directive: command.to_string(),
        })?;
        token.parse::<i32>().map_err(|_| MtlError::InvalidInt {
            line: line_num,
            directive: command.to_string(),
            value: token.to_string(),
        })
    }
}
