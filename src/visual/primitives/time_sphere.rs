//! Point cloud on the unit 2-sphere embedded in 6-D spacetime.

use super::{angles_6d, FrameInput, PointInstance};
use crate::geometry::Vector6;
use crate::transform::{project6, AngleCache, Rotation6};
use crate::visual::color::{grey, hsv_to_rgb};

const BASE_VIEWPOINT_T1: f32 = 3.0;
const VIEWPOINT_BASS_WEIGHT: f32 = 1.5;

pub struct TimeSphereCloud {
    points: Vec<Vector6>,
    instances: Vec<PointInstance>,
    size: f32,
}

impl TimeSphereCloud {
    pub fn new(points: Vec<Vector6>) -> Self {
        Self {
            instances: vec![PointInstance::CULLED; points.len()],
            points,
            size: 0.0,
        }
    }

    pub fn instances(&self) -> &[PointInstance] {
        &self.instances
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn viewpoint_t1(input: &FrameInput) -> f32 {
        BASE_VIEWPOINT_T1 + VIEWPOINT_BASS_WEIGHT * input.bass()
    }

    pub fn update(&mut self, input: &FrameInput, cache: &mut AngleCache) {
        let rotation = Rotation6::new(angles_6d(input), cache);
        let camera_t1 = Self::viewpoint_t1(input);

        for (out, p) in self.instances.iter_mut().zip(&self.points) {
            let rotated = rotation.apply(*p);
            *out = match project6(rotated, camera_t1) {
                Some(position) => {
                    PointInstance::new(position, point_color(rotated, camera_t1, input))
                }
                None => PointInstance::CULLED,
            };
        }
        self.size = input.modulated_point_size();
    }
}

fn point_color(v: Vector6, camera_t1: f32, input: &FrameInput) -> [f32; 3] {
    let brightness = ((camera_t1 - v.t1()) / camera_t1).max(0.0);
    match input.coloring() {
        Some(f) => {
            let lit = brightness * (1.0 + 0.5 * f.bass);
            hsv_to_rgb(
                (v.t2() + v.t3() + 2.0) / 4.0 + 0.2 * f.mid,
                0.7 + 0.3 * f.high_mid,
                lit * (0.8 + 0.2 * f.bass),
            )
        }
        None => grey(brightness),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::geometry::sample_time_sphere;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_projection_scales_space_by_viewpoint() {
        let mut cloud = TimeSphereCloud::new(vec![Vector6::from_space(0.0, 0.0, 1.0)]);
        let mut cache = AngleCache::default();
        cloud.update(&idle_input(0.0), &mut cache);

        let p = cloud.instances()[0];
        assert_abs_diff_eq!(p.position[2], 1.0 / 3.0, epsilon = 1e-6);
        // t1 = 0 gives full brightness
        assert_eq!(p.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_points_at_or_behind_viewpoint_are_culled() {
        let mut cloud = TimeSphereCloud::new(vec![
            Vector6::new(3.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            Vector6::new(3.5, 0.0, 0.0, 0.0, 1.0, 0.0),
            Vector6::from_space(0.0, 1.0, 0.0),
        ]);
        let mut cache = AngleCache::default();
        // No rotation at t = 0 while idle; the viewpoint sits at t1 = 3
        cloud.update(&idle_input(0.0), &mut cache);

        for culled in &cloud.instances()[..2] {
            assert!(culled.is_culled());
            assert_eq!(culled.position, [9999.0; 3]);
            assert_eq!(culled.color, [0.0; 3]);
        }
        assert!(!cloud.instances()[2].is_culled());
    }

    #[test]
    fn test_every_point_stays_visible() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cloud = TimeSphereCloud::new(sample_time_sphere(300, &mut rng));
        let mut cache = AngleCache::default();
        for step in 0..10 {
            cloud.update(&playing_input(step as f64, 0.6, 0.3, 0.2, 0.1), &mut cache);
            assert!(cloud.instances().iter().all(|p| !p.is_culled()));
        }
        assert_abs_diff_eq!(cloud.size(), 0.02 + 0.03 * 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_playing_colour() {
        let input = playing_input(0.0, 0.0, 0.5, 1.0, 0.0);
        let color = point_color(Vector6::from_space(1.0, 0.0, 0.0), 3.0, &input);
        let expected = hsv_to_rgb(0.5 + 0.1, 1.0, 0.8);
        for (a, e) in color.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_brightness_falls_off_toward_viewpoint() {
        let input = idle_input(0.0);
        let v = Vector6::new(1.5, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(point_color(v, 3.0, &input), [0.5, 0.5, 0.5]);
        let behind = Vector6::new(4.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(point_color(behind, 3.0, &input), [0.0; 3]);
    }
}
