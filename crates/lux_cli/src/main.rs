//! Lux - render a demo scene to a PNG file.
//!
//! Usage: `lux [settings.json]`. Without an argument the default settings
//! are used. Set `RUST_LOG=lux_renderer=debug` for per-shape scene logging.

mod scenes;
mod settings;

use anyhow::{Context, Result};
use lux_renderer::{render, ImageBuffer};
use settings::Settings;
use std::path::{Path, PathBuf};

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Image buffer does not match its dimensions")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    rgba.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Lux");

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            Settings::load(&path)?
        }
        None => Settings::default(),
    };

    let demo = scenes::build(&settings)?;
    let image = render(&demo.camera, &demo.scene, &settings.render_config());

    save_png(&image, &settings.output)?;
    log::info!("Saved {}", settings.output.display());

    Ok(())
}
