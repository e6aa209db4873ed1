//! Dimensional transform engine: cached trig, plane rotations, perspective projection.

pub mod angle_cache;
pub mod projection;
pub mod rotation;

pub use angle_cache::AngleCache;
pub use projection::{project4, project6, CULLED_POSITION, NEAR_PLANE_EPSILON};
pub use rotation::{rotate4, rotate6, Plane4, Plane6, Rotation4, Rotation6, SinCos};
