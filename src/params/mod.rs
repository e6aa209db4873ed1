//! Parameter definitions with units and documented semantics.
//!
//! All tunables live here with:
//! - Units (seconds, bins, decibels, world units)
//! - Documented ranges and meanings
//! - Defaults matching the hand-tuned visual
//!
//! The per-primitive rotation rates and audio weights are not tunables; they
//! live next to the update routines that use them.

mod audio;
mod camera;
mod controls;
mod geometry;
mod render;
mod settings;

// Re-export all types
pub use audio::{audio_constants, AnalyzerConfig, FeatureConfig};
pub use camera::OrbitCamera;
pub use controls::ControlSettings;
pub use geometry::GeometryConfig;
pub use render::{RecordingConfig, RenderConfig};
pub use settings::{Settings, DEFAULT_CONFIG_FILE};
