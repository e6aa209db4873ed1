//! Quantized sine/cosine lookup shared by every plane rotation.
//!
//! Angles are rounded to two decimal places before lookup, so the value
//! returned is `sin`/`cos` of the *rounded* angle. That trades exactness for
//! reuse: at 60 fps the slowest planes advance less than 0.01 rad per frame and
//! hit the same key on consecutive frames.
//!
//! The table is a memo, not a source of truth. It is bounded and evicts the
//! least recently used key when full; a miss just recomputes.
//!
//! Keys follow a clock that keeps advancing and are not reduced modulo 2π, so
//! old keys never come back. The bound only caps memory: hits come from reuse
//! within a frame and between adjacent frames. Once full, each miss also pays
//! a linear scan to find the eviction victim.

use std::collections::HashMap;

/// Quantization steps per radian (two decimal digits)
pub const QUANTIZATION_STEPS: f64 = 100.0;

/// Default number of cached angles
pub const DEFAULT_CAPACITY: usize = 4096;

#[derive(Clone, Copy, Debug)]
struct Entry {
    sin: f32,
    cos: f32,
    last_used: u64,
}

/// Bounded least-recently-used table of quantized angles
#[derive(Debug)]
pub struct AngleCache {
    entries: HashMap<i64, Entry>,
    capacity: usize,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl Default for AngleCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl AngleCache {
    /// Create a cache holding at most `capacity` angles (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Quantized key for an angle in radians
    pub fn key(angle: f64) -> i64 {
        (angle * QUANTIZATION_STEPS).round() as i64
    }

    /// `(sin, cos)` of the angle rounded to the cache's precision
    pub fn sin_cos(&mut self, angle: f64) -> (f32, f32) {
        let key = Self::key(angle);
        self.clock += 1;
        let now = self.clock;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = now;
            self.hits += 1;
            return (entry.sin, entry.cos);
        }

        self.misses += 1;
        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }

        let (sin, cos) = (key as f64 / QUANTIZATION_STEPS).sin_cos();
        let entry = Entry {
            sin: sin as f32,
            cos: cos as f32,
            last_used: now,
        };
        self.entries.insert(key, entry);
        (entry.sin, entry.cos)
    }

    pub fn sin(&mut self, angle: f64) -> f32 {
        self.sin_cos(angle).0
    }

    pub fn cos(&mut self, angle: f64) -> f32 {
        self.sin_cos(angle).1
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups served without recomputation
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_rounded_angle() {
        let mut cache = AngleCache::default();

        let (s, c) = cache.sin_cos(0.504);
        assert!((s - 0.5f32.sin()).abs() < 1e-6);
        assert!((c - 0.5f32.cos()).abs() < 1e-6);

        assert_eq!(cache.cos(0.0), 1.0);
        assert_eq!(cache.sin(0.0), 0.0);
    }

    #[test]
    fn test_nearby_angles_share_a_key() {
        let mut cache = AngleCache::default();
        cache.sin_cos(1.234);
        cache.sin_cos(1.2301);
        cache.sin_cos(1.226);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 2);
    }

    #[test]
    fn test_negative_angles_quantize_symmetrically() {
        assert_eq!(AngleCache::key(-0.304), -30);
        assert_eq!(AngleCache::key(0.304), 30);

        let mut cache = AngleCache::default();
        let (s_neg, c_neg) = cache.sin_cos(-0.3);
        let (s_pos, c_pos) = cache.sin_cos(0.3);
        assert!((s_neg + s_pos).abs() < 1e-7);
        assert!((c_neg - c_pos).abs() < 1e-7);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_bounds_growth() {
        let mut cache = AngleCache::with_capacity(8);
        for step in 0..100 {
            cache.sin_cos(step as f64 * 0.05);
        }
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.misses(), 100);
    }

    #[test]
    fn test_recently_used_key_survives_eviction() {
        let mut cache = AngleCache::with_capacity(2);
        cache.sin_cos(1.0);
        cache.sin_cos(2.0);
        cache.sin_cos(1.0); // refresh 1.0
        cache.sin_cos(3.0); // evicts 2.0

        let misses_before = cache.misses();
        cache.sin_cos(1.0);
        assert_eq!(cache.misses(), misses_before);
        cache.sin_cos(2.0);
        assert_eq!(cache.misses(), misses_before + 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = AngleCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
        cache.sin_cos(0.1);
        cache.sin_cos(0.2);
        assert_eq!(cache.len(), 1);
    }
}
