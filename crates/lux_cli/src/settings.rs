//! Render settings, optionally loaded from a JSON file.

use anyhow::{ensure, Context, Result};
use lux_renderer::{LightingMode, RenderConfig, ShadingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Deepest recursion a settings file may ask for.
pub const MAX_BOUNCES_LIMIT: u32 = 64;
/// Most extra indirect samples per hit a settings file may ask for.
pub const RAY_SPLITS_LIMIT: u32 = 1024;

/// Built-in scenes the binary can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoScene {
    /// Every primitive, both light kinds, nested glass and a mirror
    #[default]
    Showcase,
    /// Refraction through nested transparent spheres
    Glass,
    /// A sphere lit only by an emissive box
    Emitter,
}

/// Settings for one render. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scene: DemoScene,
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_bounces: u32,
    pub ray_splits: u32,
    pub lighting: LightingMode,
    pub disable_lighting: bool,
    pub seed: u64,
    pub bucket_size: u32,
    /// PNG file the image is written to
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: DemoScene::Showcase,
            width: 640,
            height: 360,
            samples_per_pixel: 16,
            max_bounces: 4,
            ray_splits: 0,
            lighting: LightingMode::Combined,
            disable_lighting: false,
            seed: 0,
            bucket_size: 32,
            output: PathBuf::from("lux.png"),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text).context("Failed to parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "image size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.samples_per_pixel > 0, "samples_per_pixel must be at least 1");
        ensure!(self.bucket_size > 0, "bucket_size must be at least 1");
        ensure!(
            self.max_bounces <= MAX_BOUNCES_LIMIT,
            "max_bounces must be at most {MAX_BOUNCES_LIMIT}, got {}",
            self.max_bounces
        );
        ensure!(
            self.ray_splits <= RAY_SPLITS_LIMIT,
            "ray_splits must be at most {RAY_SPLITS_LIMIT}, got {}",
            self.ray_splits
        );
        Ok(())
    }

    /// Shading options for the evaluator. The sky comes from the demo scene.
    pub fn shading_config(&self) -> ShadingConfig {
        ShadingConfig::default()
            .with_lighting(self.lighting)
            .with_lighting_disabled(self.disable_lighting)
            .with_max_bounces(self.max_bounces)
            .with_ray_splits(self.ray_splits)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_samples(self.samples_per_pixel)
            .with_seed(self.seed)
            .with_bucket_size(self.bucket_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json(
            r#"{ "scene": "glass", "width": 32, "lighting": "indirect", "output": "out/glass.png" }"#,
        )
        .unwrap();

        assert_eq!(settings.scene, DemoScene::Glass);
        assert_eq!(settings.width, 32);
        assert_eq!(settings.height, Settings::default().height);
        assert_eq!(settings.lighting, LightingMode::Indirect);
        assert_eq!(settings.output, PathBuf::from("out/glass.png"));

        let shading = settings.shading_config();
        assert_eq!(shading.lighting, LightingMode::Indirect);
        assert_eq!(shading.max_bounces, settings.max_bounces);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Settings::from_json(r#"{ "width": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "samples_per_pixel": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "lighting": "ambient" }"#).is_err());
        assert!(Settings::from_json(r#"{ "widht": 10 }"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_rejects_runaway_recursion() {
        let err = Settings::from_json(r#"{ "ray_splits": 4294967295 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("ray_splits"));
        assert!(Settings::from_json(r#"{ "max_bounces": 4294967295 }"#).is_err());

        let at_limit = format!(
            r#"{{ "max_bounces": {MAX_BOUNCES_LIMIT}, "ray_splits": {RAY_SPLITS_LIMIT} }}"#
        );
        assert!(Settings::from_json(&at_limit).is_ok());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Settings::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.json"));
    }

    #[test]
    fn test_render_config_carries_seed() {
        let settings = Settings {
            seed: 99,
            samples_per_pixel: 3,
            ..Default::default()
        };
        let config = settings.render_config();
        assert_eq!(config.seed, 99);
        assert_eq!(config.samples_per_pixel, 3);
    }
}
