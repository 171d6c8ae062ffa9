//! High-level MTL import entry points
//!
//! Reads an MTL file, parses every material definition, and runs the
//! translator over each one, yielding finished [`Material`]s with their
//! shader trees attached.

use std::path::Path;

use thiserror::Error;

use crate::assets::ImageLoader;
use crate::config::ImportConfig;
use crate::material::Material;
use crate::mtl::{MtlError, MtlParser};
use crate::translate::ShaderTreeBuilder;

/// Import errors
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to read the MTL file
    #[error("Failed to read MTL file: {0}")]
    Io(#[from] std::io::Error),

    /// The MTL file did not parse
    #[error("Failed to parse MTL file: {0}")]
    Parse(#[from] MtlError),

    /// A requested material is not defined in the file
    #[error("Material '{0}' not found in MTL file")]
    MaterialNotFound(String),
}

/// Imports materials from MTL files
#[derive(Debug, Default)]
pub struct MtlImporter {
    config: ImportConfig,
}

impl MtlImporter {
    /// Create an importer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer with explicit configuration
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import every material defined in an MTL file, in definition order
    pub fn load_all(
        &self,
        mtl_path: impl AsRef<Path>,
        loader: &mut dyn ImageLoader,
    ) -> Result<Vec<Material>, ImportError> {
        let mtl_path = mtl_path.as_ref();
        let contents = std::fs::read_to_string(mtl_path)?;
        let mtl_dir = self.mtl_directory(mtl_path);

        let records = MtlParser::parse(&contents, &mtl_dir)?;
        log::info!(
            "Parsed {} material(s) from {:?}",
            records.len(),
            mtl_path
        );

        let mut materials = Vec::with_capacity(records.len());
        for record in &records {
            let mut material = Material::new(record.name.clone());
            let builder = ShaderTreeBuilder::new(record, &mut material, loader);
            material.node_tree = Some(builder.into_tree());
            materials.push(material);
        }
        Ok(materials)
    }

    /// Import one material by its `newmtl` name
    pub fn load_named(
        &self,
        mtl_path: impl AsRef<Path>,
        name: &str,
        loader: &mut dyn ImageLoader,
    ) -> Result<Material, ImportError> {
        let materials = self.load_all(mtl_path, loader)?;
        materials
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ImportError::MaterialNotFound(name.to_string()))
    }

    /// Base directory for relative texture paths, trailing separator
    /// included so it can be prepended to raw paths verbatim
    fn mtl_directory(&self, mtl_path: &Path) -> String {
        if let Some(dir) = &self.config.texture_dir {
            return format!("{}/", dir.display());
        }
        match mtl_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                format!("{}/", parent.display())
            }
            _ => String::new(),
        }
    }
}
