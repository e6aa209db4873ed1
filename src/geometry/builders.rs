//! One-shot builders for the four primitives' fixed vertex and edge sets.
//!
//! Everything here runs once at startup. The results are never mutated again;
//! only their rotated/projected copies change per frame.

use rand::Rng;

use super::vector::{Edge, Vector4, Vector6};

/// Vertex set plus the edges connecting them (hypercube-style primitives)
#[derive(Debug, Clone)]
pub struct EdgeGeometry<V> {
    pub vertices: Vec<V>,
    pub edges: Vec<Edge>,
}

/// All sign combinations of `N` coordinates in {-1, +1}, first coordinate varying slowest.
fn sign_corners<const N: usize>() -> Vec<[f32; N]> {
    (0..1usize << N)
        .map(|bits| {
            let mut corner = [0.0; N];
            for (axis, c) in corner.iter_mut().enumerate() {
                let bit = (bits >> (N - 1 - axis)) & 1;
                *c = if bit == 1 { 1.0 } else { -1.0 };
            }
            corner
        })
        .collect()
}

/// Connect every pair of corners that differ in exactly one coordinate.
fn hamming_one_edges<const N: usize>(corners: &[[f32; N]]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for i in 0..corners.len() {
        for j in (i + 1)..corners.len() {
            let differing = corners[i]
                .iter()
                .zip(corners[j].iter())
                .filter(|(a, b)| a != b)
                .count();
            if differing == 1 {
                edges.push(Edge::new(i as u32, j as u32));
            }
        }
    }
    edges
}

/// Build the 4-D hypercube: 16 vertices of {-1,+1}⁴, 32 edges.
pub fn build_tesseract() -> EdgeGeometry<Vector4> {
    let corners = sign_corners::<4>();
    let edges = hamming_one_edges(&corners);
    EdgeGeometry {
        vertices: corners.into_iter().map(Vector4).collect(),
        edges,
    }
}

/// Build the 3-space cube embedded at t = 0: 8 vertices, 12 edges.
pub fn build_time_cube() -> EdgeGeometry<Vector6> {
    let corners = sign_corners::<3>();
    let edges = hamming_one_edges(&corners);
    EdgeGeometry {
        vertices: corners
            .into_iter()
            .map(|[x, y, z]| Vector6::from_space(x, y, z))
            .collect(),
        edges,
    }
}

/// Draw a unit vector by normalizing a uniform draw from [-1, 1]^N.
///
/// The all-zero draw has no direction and is redrawn; any other draw is accepted.
pub fn random_unit_vector<const N: usize, R: Rng + ?Sized>(rng: &mut R) -> [f32; N] {
    loop {
        let mut v = [0.0f32; N];
        for c in v.iter_mut() {
            *c = rng.gen_range(-1.0f32..=1.0);
        }

        let len_sq: f32 = v.iter().map(|c| c * c).sum();
        if len_sq == 0.0 {
            continue;
        }

        let len = len_sq.sqrt();
        for c in v.iter_mut() {
            *c /= len;
        }
        return v;
    }
}

/// Sample `count` points on the unit 3-sphere in 4-space.
pub fn sample_hypersphere<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vector4> {
    (0..count)
        .map(|_| Vector4(random_unit_vector::<4, R>(rng)))
        .collect()
}

/// Sample `count` points on the unit 2-sphere, embedded in 6-D at t = 0.
pub fn sample_time_sphere<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vector6> {
    (0..count)
        .map(|_| {
            let [x, y, z] = random_unit_vector::<3, R>(rng);
            Vector6::from_space(x, y, z)
        })
        .collect()
}
