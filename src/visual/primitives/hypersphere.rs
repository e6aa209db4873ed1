//! Point cloud on the unit 3-sphere, lit by a fixed direction in (w, x, y, z).

use super::{angles_4d, FrameInput, PointInstance};
use crate::geometry::Vector4;
use crate::transform::{project4, AngleCache, Rotation4};
use crate::visual::color::{grey, hsv_to_rgb};

const BASE_VIEWPOINT_W: f32 = 3.5;
const VIEWPOINT_BASS_WEIGHT: f32 = 1.5;

/// Light direction for Lambert shading, over (w, x, y, z)
const LIGHT: Vector4 = Vector4::new(0.577, 0.577, 0.577, 0.0);

pub struct HyperSphereCloud {
    points: Vec<Vector4>,
    instances: Vec<PointInstance>,
    size: f32,
}

impl HyperSphereCloud {
    pub fn new(points: Vec<Vector4>) -> Self {
        Self {
            instances: vec![PointInstance::CULLED; points.len()],
            points,
            size: 0.0,
        }
    }

    pub fn instances(&self) -> &[PointInstance] {
        &self.instances
    }

    /// Point size written by the last update
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn viewpoint_w(input: &FrameInput) -> f32 {
        BASE_VIEWPOINT_W + VIEWPOINT_BASS_WEIGHT * input.bass()
    }

    pub fn update(&mut self, input: &FrameInput, cache: &mut AngleCache) {
        let rotation = Rotation4::new(angles_4d(input), cache);
        let camera_w = Self::viewpoint_w(input);

        for (out, p) in self.instances.iter_mut().zip(&self.points) {
            let rotated = rotation.apply(*p);
            *out = match project4(rotated, camera_w) {
                Some(position) => PointInstance::new(position, point_color(rotated, input)),
                None => PointInstance::CULLED,
            };
        }
        self.size = input.modulated_point_size();
    }
}

fn point_color(v: Vector4, input: &FrameInput) -> [f32; 3] {
    let brightness = v.dot(&LIGHT).max(0.0);
    match input.coloring() {
        Some(f) => {
            let lit = brightness * (1.0 + 0.5 * f.bass);
            hsv_to_rgb(
                (v.w() + 1.0) / 2.0 + 0.2 * f.mid,
                0.8 + 0.2 * f.high_mid,
                lit * (0.8 + 0.2 * f.bass),
            )
        }
        None => grey(brightness),
    }
}
