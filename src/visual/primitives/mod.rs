//! The four visualization primitives and the GPU-facing buffers they fill.
//!
//! Each primitive owns its fixed geometry plus a render buffer sized once at
//! construction. `update` rewrites that buffer in place: rotate, project,
//! colour. Culled geometry is written as [`CULLED_POSITION`] with a zero
//! colour so the renderer never sees a missing entry.

mod hypersphere;
mod tesseract;
mod time_cube;
mod time_sphere;

pub use hypersphere::HyperSphereCloud;
pub use tesseract::Tesseract;
pub use time_cube::TimeCube;
pub use time_sphere::TimeSphereCloud;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::color::ColorScheme;
use crate::audio::{AudioFeatures, AudioReading};
use crate::transform::CULLED_POSITION;

/// Line-list vertex (two per edge)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const CULLED: Self = Self {
        position: CULLED_POSITION,
        color: [0.0; 3],
    };

    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn is_culled(&self) -> bool {
        self.position == CULLED_POSITION
    }
}

/// Per-instance data for one billboarded point
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointInstance {
    pub const CULLED: Self = Self {
        position: CULLED_POSITION,
        color: [0.0; 3],
    };

    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn is_culled(&self) -> bool {
        self.position == CULLED_POSITION
    }
}

/// Render state of the visible primitive after an update
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    Lines(&'a [LineVertex]),
    Points {
        points: &'a [PointInstance],
        /// Shared point size (world units)
        size: f32,
    },
}

/// Everything a primitive reads during one update
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Animation time (elapsed time scaled by rotation speed)
    pub time_s: f64,
    pub audio: AudioReading,
    pub scheme: ColorScheme,
    /// Base point size before bass modulation
    pub point_size: f32,
}

impl FrameInput {
    /// Features that drive geometry: present only while audio plays
    pub fn reactive(&self) -> Option<AudioFeatures> {
        self.audio.playing.then_some(self.audio.features)
    }

    /// Bass while playing, 0 when idle
    pub fn bass(&self) -> f32 {
        self.reactive().map_or(0.0, |f| f.bass)
    }

    /// Features that drive colour: only while playing under [`ColorScheme::Spectrum`]
    pub fn coloring(&self) -> Option<AudioFeatures> {
        match self.scheme {
            ColorScheme::Spectrum => self.reactive(),
            ColorScheme::Monochrome => None,
        }
    }

    /// Point size grows with bass while playing
    pub fn modulated_point_size(&self) -> f32 {
        self.point_size + POINT_SIZE_BASS_WEIGHT * self.bass()
    }
}

const POINT_SIZE_BASS_WEIGHT: f32 = 0.03;

/// Baseline rates (rad/s) for the 4-D planes WX and YZ; WY and XZ only move with audio
const RATES_4D: [f64; 4] = [0.5, 0.7, 0.0, 0.0];

/// Rates (rad/s) for the 6-D planes T1T2, T2T3, T3T1, XY, YZ, ZX
const RATES_6D: [f64; 6] = [0.5, 0.4, 0.6, 0.7, 0.3, 0.5];

/// Angles for `Plane4::ORDER`, shared by both 4-D primitives
pub fn angles_4d(input: &FrameInput) -> [f64; 4] {
    let t = input.time_s;
    let mut angles = RATES_4D.map(|rate| rate * t);
    if let Some(f) = input.reactive() {
        angles[0] += f.bass as f64 * 0.5;
        angles[1] += f.mid as f64 * 0.3;
        angles[2] += f.high_mid as f64 * 0.2;
        angles[3] += f.treble as f64 * 0.1;
    }
    angles
}

/// Angles for `Plane6::ORDER`, shared by both 6-D primitives.
///
/// Bass drives the time planes, the upper bands the space planes.
pub fn angles_6d(input: &FrameInput) -> [f64; 6] {
    let t = input.time_s;
    let mut angles = RATES_6D.map(|rate| rate * t);
    if let Some(f) = input.reactive() {
        let offsets = [
            f.bass * 0.4,
            f.bass * 0.3,
            f.bass * 0.5,
            f.mid * 0.3,
            f.high_mid * 0.2,
            f.treble * 0.1,
        ];
        for (angle, offset) in angles.iter_mut().zip(offsets) {
            *angle += offset as f64;
        }
    }
    angles
}

/// Write one edge as two line vertices; if either end is culled the whole edge is.
fn write_edge(slot: &mut [LineVertex], a: Option<Vec3>, b: Option<Vec3>, color: [f32; 3]) {
    match (a, b) {
        (Some(a), Some(b)) => {
            slot[0] = LineVertex::new(a, color);
            slot[1] = LineVertex::new(b, color);
        }
        _ => slot.fill(LineVertex::CULLED),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn idle_input(time_s: f64) -> FrameInput {
        FrameInput {
            time_s,
            audio: AudioReading::default(),
            scheme: ColorScheme::Spectrum,
            point_size: 0.02,
        }
    }

    pub fn playing_input(time_s: f64, bass: f32, mid: f32, high_mid: f32, treble: f32) -> FrameInput {
        FrameInput {
            time_s,
            audio: AudioReading {
                features: AudioFeatures {
                    bass,
                    mid,
                    high_mid,
                    treble,
                    gain: 1.0,
                },
                playing: true,
            },
            scheme: ColorScheme::Spectrum,
            point_size: 0.02,
        }
    }
}
