//! 4-D hypercube drawn as 32 edges with one shared colour.

use super::{angles_4d, write_edge, FrameInput, LineVertex};
use crate::geometry::{EdgeGeometry, Vector4};
use crate::transform::{project4, AngleCache, Rotation4};
use crate::visual::color::hsl_to_rgb;

/// Viewpoint along w at rest; bass pushes it further out
const BASE_VIEWPOINT_W: f32 = 4.0;
const VIEWPOINT_BASS_WEIGHT: f32 = 2.0;

const IDLE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub struct Tesseract {
    geometry: EdgeGeometry<Vector4>,
    rotated: Vec<Vector4>,
    lines: Vec<LineVertex>,
}

impl Tesseract {
    pub fn new(geometry: EdgeGeometry<Vector4>) -> Self {
        Self {
            rotated: geometry.vertices.clone(),
            lines: vec![LineVertex::CULLED; geometry.edges.len() * 2],
            geometry,
        }
    }

    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    pub fn edge_count(&self) -> usize {
        self.geometry.edges.len()
    }

    pub fn viewpoint_w(input: &FrameInput) -> f32 {
        BASE_VIEWPOINT_W + VIEWPOINT_BASS_WEIGHT * input.bass()
    }

    pub fn update(&mut self, input: &FrameInput, cache: &mut AngleCache) {
        let rotation = Rotation4::new(angles_4d(input), cache);
        for (out, v) in self.rotated.iter_mut().zip(&self.geometry.vertices) {
            *out = rotation.apply(*v);
        }

        let camera_w = Self::viewpoint_w(input);
        let color = self.edge_color(input, camera_w);

        for (edge, slot) in self.geometry.edges.iter().zip(self.lines.chunks_exact_mut(2)) {
            let (a, b) = edge.endpoints();
            write_edge(
                slot,
                project4(self.rotated[a], camera_w),
                project4(self.rotated[b], camera_w),
                color,
            );
        }
    }

    /// Shared colour, shaded by the depth of the first rotated vertex
    fn edge_color(&self, input: &FrameInput, camera_w: f32) -> [f32; 3] {
        let Some(f) = input.coloring() else {
            return IDLE_COLOR;
        };
        let w0 = self.rotated.first().map_or(0.0, |v| v.w());
        let shade = ((camera_w - w0) / camera_w).clamp(0.0, 1.0);

        hsl_to_rgb(
            (0.6 + 0.4 * f.mid).rem_euclid(1.0),
            1.0 - 0.5 * f.treble,
            (0.5 + 0.5 * f.bass) * shade,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::geometry::build_tesseract;
    use crate::visual::color::ColorScheme;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rest_pose_projects_every_edge() {
        let mut tesseract = Tesseract::new(build_tesseract());
        let mut cache = AngleCache::default();
        tesseract.update(&idle_input(0.0), &mut cache);

        assert_eq!(tesseract.lines().len(), 64);
        assert!(tesseract.lines().iter().all(|v| !v.is_culled()));
        assert!(tesseract.lines().iter().all(|v| v.color == IDLE_COLOR));

        // Vertex 0 is (-1,-1,-1,-1): scale 1/(4+1)
        let first = tesseract.lines()[0].position;
        for c in first {
            assert_abs_diff_eq!(c, -0.2, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_bass_pushes_viewpoint_out() {
        assert_eq!(Tesseract::viewpoint_w(&idle_input(0.0)), 4.0);
        let loud = playing_input(0.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(Tesseract::viewpoint_w(&loud), 6.0);
    }

    #[test]
    fn test_playing_colour_follows_bands() {
        let mut tesseract = Tesseract::new(build_tesseract());
        let mut cache = AngleCache::default();
        let input = playing_input(0.0, 0.0, 0.0, 0.0, 0.0);
        tesseract.update(&input, &mut cache);

        // First vertex has w = -1, shade clamps to 1; HSL(0.6, 1, 0.5)
        let expected = hsl_to_rgb(0.6, 1.0, 0.5);
        assert_eq!(tesseract.lines()[0].color, expected);
        assert_ne!(expected, IDLE_COLOR);
    }

    #[test]
    fn test_monochrome_stays_white_while_playing() {
        let mut tesseract = Tesseract::new(build_tesseract());
        let mut cache = AngleCache::default();
        let mut input = playing_input(3.0, 0.8, 0.4, 0.2, 0.1);
        input.scheme = ColorScheme::Monochrome;
        tesseract.update(&input, &mut cache);

        assert!(tesseract
            .lines()
            .iter()
            .filter(|v| !v.is_culled())
            .all(|v| v.color == IDLE_COLOR));
    }

    #[test]
    fn test_edges_stay_paired_over_time() {
        let mut tesseract = Tesseract::new(build_tesseract());
        let mut cache = AngleCache::default();
        for step in 0..50 {
            tesseract.update(&idle_input(step as f64 * 0.25), &mut cache);
            for pair in tesseract.lines().chunks_exact(2) {
                assert_eq!(pair[0].is_culled(), pair[1].is_culled());
            }
        }
    }
}
