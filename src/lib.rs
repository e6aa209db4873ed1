//! DimensionalAV library - audio-reactive higher-dimensional geometry

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod geometry;
pub mod params;
pub mod rendering;
pub mod transform;
pub mod visual;
