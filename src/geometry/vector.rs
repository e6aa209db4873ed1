//! Fixed-dimension vectors for the 4-D and 3-space + 3-time point sets.

/// Point in 4-D space, stored as `[w, x, y, z]`.
///
/// `w` is the projection axis: the viewpoint sits on it and the other three
/// coordinates survive into 3-D.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector4(pub [f32; 4]);

impl Vector4 {
    pub const DIM: usize = 4;

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self([w, x, y, z])
    }

    pub fn w(&self) -> f32 {
        self.0[0]
    }

    pub fn x(&self) -> f32 {
        self.0[1]
    }

    pub fn y(&self) -> f32 {
        self.0[2]
    }

    pub fn z(&self) -> f32 {
        self.0[3]
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

/// Point in 3-space + 3-time, stored as `[t1, t2, t3, x, y, z]`.
///
/// The time and space triples are algebraically identical; the split only
/// matters for which planes get rotated, which audio band drives them, and
/// how points are coloured. `t1` is the projection axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector6(pub [f32; 6]);

impl Vector6 {
    pub const DIM: usize = 6;

    pub const fn new(t1: f32, t2: f32, t3: f32, x: f32, y: f32, z: f32) -> Self {
        Self([t1, t2, t3, x, y, z])
    }

    /// Embed a spatial point with all three time coordinates at zero.
    pub const fn from_space(x: f32, y: f32, z: f32) -> Self {
        Self([0.0, 0.0, 0.0, x, y, z])
    }

    pub fn t1(&self) -> f32 {
        self.0[0]
    }

    pub fn t2(&self) -> f32 {
        self.0[1]
    }

    pub fn t3(&self) -> f32 {
        self.0[2]
    }

    pub fn space(&self) -> [f32; 3] {
        [self.0[3], self.0[4], self.0[5]]
    }

    pub fn norm(&self) -> f32 {
        self.0.iter().map(|c| c * c).sum::<f32>().sqrt()
    }
}

/// Unordered pair of indices into a primitive's fixed vertex array.
///
/// Stored with `a < b`, so two edges over the same endpoints compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
}

impl Edge {
    pub fn new(i: u32, j: u32) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a as usize, self.b as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector4_accessors() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.w(), v.x(), v.y(), v.z()), (1.0, 2.0, 3.0, 4.0));
        assert!((v.norm() - 30.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_vector6_space_embedding() {
        let v = Vector6::from_space(1.0, -1.0, 1.0);
        assert_eq!((v.t1(), v.t2(), v.t3()), (0.0, 0.0, 0.0));
        assert_eq!(v.space(), [1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_edge_is_unordered() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        assert_eq!(Edge::new(5, 2).endpoints(), (2, 5));
    }
}
