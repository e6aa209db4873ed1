//! Aggregate settings, optionally loaded from a TOML file.
//!
//! * `--config <path>` names the file explicitly; failing to read or parse it is an error.
//! * Otherwise `dimensional-av.toml` in the working directory is used if present.
//! * Every section and field has a default, so the file may be partial or absent.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{AnalyzerConfig, ControlSettings, FeatureConfig, GeometryConfig, OrbitCamera, RenderConfig};
use crate::error::AppError;

/// Config file picked up from the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "dimensional-av.toml";

/// Default angle-cache capacity (quantized angles)
fn default_angle_cache_capacity() -> usize {
    crate::transform::angle_cache::DEFAULT_CAPACITY
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub geometry: GeometryConfig,

    #[serde(default)]
    pub features: FeatureConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub controls: ControlSettings,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub camera: OrbitCamera,

    /// Upper bound on cached quantized angles
    #[serde(default = "default_angle_cache_capacity")]
    pub angle_cache_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            features: FeatureConfig::default(),
            analyzer: AnalyzerConfig::default(),
            controls: ControlSettings::default(),
            render: RenderConfig::default(),
            camera: OrbitCamera::default(),
            angle_cache_capacity: default_angle_cache_capacity(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|source| AppError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load from an explicit path, or from the default file if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&text, &path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every section; the first problem found is reported.
    pub fn validate(&self) -> Result<(), AppError> {
        self.analyzer
            .validate()
            .and_then(|_| self.features.validate(self.analyzer.bin_count()))
            .and_then(|_| self.geometry.validate())
            .and_then(|_| self.controls.validate())
            .map_err(AppError::InvalidConfig)?;

        if self.angle_cache_capacity == 0 {
            return Err(AppError::InvalidConfig(
                "angle cache capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
