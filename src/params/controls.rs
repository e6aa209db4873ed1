//! User-adjustable visual controls (startup values; changed at runtime by commands).

use serde::Deserialize;

use crate::visual::{ColorScheme, Mode};

/// Initial state of the interactive controls
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Primitive shown on startup
    pub initial_mode: Mode,

    /// Multiplier on every baseline rotation rate (1.0 = hand-tuned rates)
    pub rotation_speed: f32,

    /// Point-cloud point size before bass modulation (world units)
    pub point_size: f32,

    /// Colour mapping
    pub color_scheme: ColorScheme,

    /// Amount each key press changes rotation speed
    pub rotation_speed_step: f32,

    /// Amount each key press changes point size
    pub point_size_step: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Tesseract,
            rotation_speed: 1.0,
            point_size: 0.02,
            color_scheme: ColorScheme::Spectrum,
            rotation_speed_step: 0.2,
            point_size_step: 0.005,
        }
    }
}

impl ControlSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !self.rotation_speed.is_finite() || self.rotation_speed < 0.0 {
            return Err(format!(
                "rotation speed must be finite and >= 0, got {}",
                self.rotation_speed
            ));
        }
        if !(self.point_size > 0.0) {
            return Err(format!("point size must be > 0, got {}", self.point_size));
        }
        Ok(())
    }
}
