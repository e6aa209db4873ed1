//! 3-D cube embedded in 6-D spacetime, drawn as 12 edges coloured per edge.

use super::{angles_6d, write_edge, FrameInput, LineVertex};
use crate::geometry::{EdgeGeometry, Vector6};
use crate::transform::{project6, AngleCache, Rotation6};
use crate::visual::color::hsl_to_rgb;

const BASE_VIEWPOINT_T1: f32 = 3.0;
const VIEWPOINT_BASS_WEIGHT: f32 = 1.5;

/// Hue of the cube when colour does not follow audio
const REST_HUE: f32 = 0.55;

pub struct TimeCube {
    geometry: EdgeGeometry<Vector6>,
    rotated: Vec<Vector6>,
    lines: Vec<LineVertex>,
}

impl TimeCube {
    pub fn new(geometry: EdgeGeometry<Vector6>) -> Self {
        Self {
            rotated: geometry.vertices.clone(),
            lines: vec![LineVertex::CULLED; geometry.edges.len() * 2],
            geometry,
        }
    }

    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    pub fn viewpoint_t1(input: &FrameInput) -> f32 {
        BASE_VIEWPOINT_T1 + VIEWPOINT_BASS_WEIGHT * input.bass()
    }

    pub fn update(&mut self, input: &FrameInput, cache: &mut AngleCache) {
        let rotation = Rotation6::new(angles_6d(input), cache);
        for (out, v) in self.rotated.iter_mut().zip(&self.geometry.vertices) {
            *out = rotation.apply(*v);
        }

        let camera_t1 = Self::viewpoint_t1(input);
        for (edge, slot) in self.geometry.edges.iter().zip(self.lines.chunks_exact_mut(2)) {
            let (a, b) = edge.endpoints();
            let (va, vb) = (self.rotated[a], self.rotated[b]);
            let mid_t1 = 0.5 * (va.t1() + vb.t1());
            write_edge(
                slot,
                project6(va, camera_t1),
                project6(vb, camera_t1),
                edge_color(mid_t1, camera_t1, input),
            );
        }
    }
}

fn edge_color(mid_t1: f32, camera_t1: f32, input: &FrameInput) -> [f32; 3] {
    let shade = ((camera_t1 - mid_t1) / camera_t1).clamp(0.0, 1.0);
    match input.coloring() {
        Some(f) => hsl_to_rgb(
            (REST_HUE + 0.3 * f.mid).rem_euclid(1.0),
            1.0 - 0.3 * f.treble,
            (0.4 + 0.4 * shade) * (1.0 + 0.5 * f.bass),
        ),
        None => hsl_to_rgb(REST_HUE, 1.0, 0.4 + 0.4 * shade),
    }
}
