//! MTL-to-shader-graph demo application
//!
//! Imports every material from an MTL file and dumps the resulting shader
//! trees to stdout. An optional `import.toml` next to the working directory
//! configures image loading and the texture base directory.
//!
//! Usage: `mtl2graph <file.mtl> [material-name]`

use std::path::Path;

use mtl_import::prelude::*;
use mtl_import::{ConfigError, ImportError};
use thiserror::Error;

const CONFIG_PATH: &str = "import.toml";

#[derive(Error, Debug)]
enum AppError {
    #[error("usage: mtl2graph <file.mtl> [material-name]")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let mtl_path = args.next().ok_or(AppError::Usage)?;
    let material_name = args.next();

    let config = if Path::new(CONFIG_PATH).is_file() {
        log::info!("Using configuration from {CONFIG_PATH}");
        ImportConfig::load_from_file(CONFIG_PATH)?
    } else {
        ImportConfig::default()
    };

    let mut fs_loader = FsImageLoader::new();
    let mut null_loader = NullImageLoader::new();
    let loader: &mut dyn ImageLoader = if config.load_images {
        &mut fs_loader
    } else {
        &mut null_loader
    };

    let importer = MtlImporter::with_config(config);
    let materials = match material_name {
        Some(name) => vec![importer.load_named(&mtl_path, &name, loader)?],
        None => importer.load_all(&mtl_path, loader)?,
    };

    for material in &materials {
        let blend = match material.blend_method {
            BlendMethod::Opaque => "opaque",
            BlendMethod::Blend => "blend",
        };
        println!("material '{}' ({})", material.name, blend);
        if let Some(tree) = &material.node_tree {
            print!("{tree}");
        }
        println!();
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
