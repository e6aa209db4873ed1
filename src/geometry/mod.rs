//! Higher-dimensional point types and the startup geometry builders.

mod builders;
mod vector;

pub use builders::{
    build_tesseract, build_time_cube, random_unit_vector, sample_hypersphere,
    sample_time_sphere, EdgeGeometry,
};
pub use vector::{Edge, Vector4, Vector6};
