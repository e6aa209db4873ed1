//! Plane rotations over 4-D and 6-D vectors.
//!
//! A plane rotation touches exactly two coordinates `(a, b)`:
//!
//! ```text
//! a' = a·cosθ − b·sinθ
//! b' = a·sinθ + b·cosθ
//! ```
//!
//! Only a hand-picked subset of planes is animated: four of the six 4-D planes
//! (WZ and XY stay fixed) and six of the fifteen 6-D planes (never a plane
//! mixing a time axis with a space axis). Rotations do not commute, so each
//! primitive applies its planes in the fixed order of [`Plane4::ORDER`] /
//! [`Plane6::ORDER`].

use crate::geometry::{Vector4, Vector6};

use super::angle_cache::AngleCache;

/// Precomputed sine and cosine of one rotation angle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinCos {
    pub sin: f32,
    pub cos: f32,
}

impl SinCos {
    pub const IDENTITY: Self = Self { sin: 0.0, cos: 1.0 };

    /// Exact (uncached) sine and cosine
    pub fn exact(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { sin, cos }
    }

    /// Quantized lookup through the shared cache
    pub fn cached(angle: f64, cache: &mut AngleCache) -> Self {
        let (sin, cos) = cache.sin_cos(angle);
        Self { sin, cos }
    }
}

/// Rotate coordinates `a` and `b` of `coords` in place.
#[inline]
fn rotate_pair(coords: &mut [f32], a: usize, b: usize, sc: SinCos) {
    let (ca, cb) = (coords[a], coords[b]);
    coords[a] = ca * sc.cos - cb * sc.sin;
    coords[b] = ca * sc.sin + cb * sc.cos;
}

/// Animated planes of 4-D space (coordinates ordered w, x, y, z)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane4 {
    WX,
    YZ,
    WY,
    XZ,
}

impl Plane4 {
    /// Composition order used by every 4-D primitive
    pub const ORDER: [Plane4; 4] = [Plane4::WX, Plane4::YZ, Plane4::WY, Plane4::XZ];

    /// Coordinate indices `(a, b)` of the plane
    pub fn axes(self) -> (usize, usize) {
        match self {
            Plane4::WX => (0, 1),
            Plane4::YZ => (2, 3),
            Plane4::WY => (0, 2),
            Plane4::XZ => (1, 3),
        }
    }
}

/// Animated planes of 3-space + 3-time (coordinates ordered t1, t2, t3, x, y, z)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane6 {
    T1T2,
    T2T3,
    T3T1,
    XY,
    YZ,
    ZX,
}

impl Plane6 {
    /// Composition order used by every 6-D primitive: time planes, then space planes
    pub const ORDER: [Plane6; 6] = [
        Plane6::T1T2,
        Plane6::T2T3,
        Plane6::T3T1,
        Plane6::XY,
        Plane6::YZ,
        Plane6::ZX,
    ];

    /// Coordinate indices `(a, b)` of the plane.
    ///
    /// T3T1 and ZX rotate the lower-indexed axis first (`t1`, `x`), matching
    /// the sign convention of the other planes.
    pub fn axes(self) -> (usize, usize) {
        match self {
            Plane6::T1T2 => (0, 1),
            Plane6::T2T3 => (1, 2),
            Plane6::T3T1 => (0, 2),
            Plane6::XY => (3, 4),
            Plane6::YZ => (4, 5),
            Plane6::ZX => (3, 5),
        }
    }

    pub fn is_time_plane(self) -> bool {
        matches!(self, Plane6::T1T2 | Plane6::T2T3 | Plane6::T3T1)
    }
}

/// Rotate `v` within one 4-D plane. Returns a new vector.
pub fn rotate4(v: Vector4, plane: Plane4, sc: SinCos) -> Vector4 {
    let mut coords = v.0;
    let (a, b) = plane.axes();
    rotate_pair(&mut coords, a, b, sc);
    Vector4(coords)
}

/// Rotate `v` within one 6-D plane. Returns a new vector.
pub fn rotate6(v: Vector6, plane: Plane6, sc: SinCos) -> Vector6 {
    let mut coords = v.0;
    let (a, b) = plane.axes();
    rotate_pair(&mut coords, a, b, sc);
    Vector6(coords)
}

/// One frame's worth of 4-D rotation: angles for [`Plane4::ORDER`], resolved once
#[derive(Clone, Copy, Debug)]
pub struct Rotation4 {
    steps: [SinCos; 4],
}

impl Rotation4 {
    /// Resolve angles (in [`Plane4::ORDER`]) through the cache
    pub fn new(angles: [f64; 4], cache: &mut AngleCache) -> Self {
        Self {
            steps: angles.map(|angle| SinCos::cached(angle, cache)),
        }
    }

    pub fn identity() -> Self {
        Self {
            steps: [SinCos::IDENTITY; 4],
        }
    }

    /// Apply every plane in order
    pub fn apply(&self, v: Vector4) -> Vector4 {
        Plane4::ORDER
            .iter()
            .zip(self.steps.iter())
            .fold(v, |acc, (plane, sc)| rotate4(acc, *plane, *sc))
    }
}

/// One frame's worth of 6-D rotation: angles for [`Plane6::ORDER`], resolved once
#[derive(Clone, Copy, Debug)]
pub struct Rotation6 {
    steps: [SinCos; 6],
}

impl Rotation6 {
    /// Resolve angles (in [`Plane6::ORDER`]) through the cache
    pub fn new(angles: [f64; 6], cache: &mut AngleCache) -> Self {
        Self {
            steps: angles.map(|angle| SinCos::cached(angle, cache)),
        }
    }

    pub fn identity() -> Self {
        Self {
            steps: [SinCos::IDENTITY; 6],
        }
    }

    /// Apply every plane in order
    pub fn apply(&self, v: Vector6) -> Vector6 {
        Plane6::ORDER
            .iter()
            .zip(self.steps.iter())
            .fold(v, |acc, (plane, sc)| rotate6(acc, *plane, *sc))
    }
}
