//! Orbit camera configuration.

use serde::Deserialize;

/// Camera orbiting the projected 3-D scene at a fixed distance
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitCamera {
    /// Distance from the origin (world units)
    pub distance: f32,

    /// Initial yaw around the vertical axis (radians)
    pub yaw_rad: f32,

    /// Initial pitch above the horizontal plane (radians)
    pub pitch_rad: f32,

    /// Pitch clamp, keeps the up vector well-defined (radians, ±)
    pub max_pitch_rad: f32,

    /// Radians of rotation per pixel of mouse drag
    pub drag_sensitivity: f32,

    /// Fraction of the remaining distance to the target orientation covered per frame
    pub damping: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 6.0,
            yaw_rad: 0.0,
            pitch_rad: 0.0,
            max_pitch_rad: 1.5,
            drag_sensitivity: 0.005,
            damping: 0.05,
        }
    }
}
