//! Configuration system

use std::path::PathBuf;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Importer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Load texture images from disk; when false every texture map is
    /// skipped and the shader graphs carry scalar values only
    pub load_images: bool,

    /// Overrides the MTL file's directory as the base directory for
    /// relative texture paths
    pub texture_dir: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            load_images: true,
            texture_dir: None,
        }
    }
}

impl Config for ImportConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert!(config.load_images);
        assert!(config.texture_dir.is_none());
    }

    #[test]
    fn test_load_toml() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "load_images = false\ntexture_dir = \"textures\"\n").unwrap();

        let config = ImportConfig::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert!(!config.load_images);
        assert_eq!(config.texture_dir, Some(PathBuf::from("textures")));
    }

    #[test]
    fn test_unsupported_format() {
        let result = ImportConfig::load_from_file("import.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "load_images = false\n").unwrap();

        let config = ImportConfig::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert!(!config.load_images);
        assert!(config.texture_dir.is_none());
    }
}
