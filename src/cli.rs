//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::error::AppError;
use crate::params::{RecordingConfig, Settings};
use crate::visual::Mode;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "dimensional-av")]
#[command(about = "Audio-reactive higher-dimensional geometry visualizer", long_about = None)]
pub struct Args {
    /// Settings file (TOML); defaults to ./dimensional-av.toml if present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Play a WAV file
    #[arg(long, value_name = "WAV", conflicts_with = "synth")]
    pub audio: Option<PathBuf>,

    /// Play the built-in procedural composition
    #[arg(long)]
    pub synth: bool,

    /// Initial primitive: t (tesseract), s (hypersphere), c (time cube), u (time sphere)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Points per cloud primitive
    #[arg(long, value_name = "N")]
    pub points: Option<usize>,

    /// Seed for reproducible point clouds
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Starting audio sensitivity (5 = neutral)
    #[arg(long, value_name = "N")]
    pub sensitivity: Option<i32>,

    /// Record frames to PNG (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

/// Where audio comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AudioChoice {
    File(PathBuf),
    Synth,
    Silent,
}

impl Args {
    /// Load settings from file, apply command-line overrides, then validate
    pub fn load_settings(&self) -> Result<Settings, AppError> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    /// Command-line values win over file values
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(mode) = self.mode {
            settings.controls.initial_mode = mode;
        }
        if let Some(points) = self.points {
            settings.geometry.hypersphere_points = points;
            settings.geometry.time_sphere_points = points;
        }
        if let Some(seed) = self.seed {
            settings.geometry.seed = Some(seed);
        }
        if let Some(sensitivity) = self.sensitivity {
            let features = &mut settings.features;
            features.default_sensitivity =
                sensitivity.clamp(features.min_sensitivity, features.max_sensitivity);
            if features.default_sensitivity != sensitivity {
                log::warn!(
                    "Sensitivity {} out of range, using {}",
                    sensitivity,
                    features.default_sensitivity
                );
            }
        }
    }

    pub fn audio_choice(&self) -> AudioChoice {
        match (&self.audio, self.synth) {
            (Some(path), _) => AudioChoice::File(path.clone()),
            (None, true) => AudioChoice::Synth,
            (None, false) => AudioChoice::Silent,
        }
    }

    /// Create recording configuration (and its output directory) if recording
    pub fn create_recording_config(&self) -> Result<Option<RecordingConfig>, AppError> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        if !(duration > 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "recording duration must be > 0, got {}",
                duration
            )));
        }

        let config = RecordingConfig::new(duration);
        std::fs::create_dir_all(config.frames_dir())?;
        log::info!(
            "Recording {:.1}s at {} fps to {}",
            config.duration_secs,
            config.fps,
            config.frames_dir()
        );
        Ok(Some(config))
    }
}
