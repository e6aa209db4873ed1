//! Point-cloud sizes and sampling seed.

use serde::Deserialize;

/// Geometry built once at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Points sampled on the unit 3-sphere (4-D hypersphere cloud)
    pub hypersphere_points: usize,

    /// Points sampled on the unit 2-sphere (3-space + 3-time sphere cloud)
    pub time_sphere_points: usize,

    /// RNG seed for reproducible clouds (random on each run if unset)
    pub seed: Option<u64>,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            hypersphere_points: 2000,
            time_sphere_points: 2000,
            seed: None,
        }
    }
}

impl GeometryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.hypersphere_points == 0 || self.time_sphere_points == 0 {
            return Err("point clouds need at least one point".to_string());
        }
        Ok(())
    }
}
