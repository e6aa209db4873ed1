//! Audio analysis and feature-extraction configuration.

use serde::Deserialize;
use std::ops::Range;

/// Spectrum analyser configuration (produces byte magnitudes per frequency bin)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// FFT window size (must be power of 2); yields `fft_size / 2` bins
    pub fft_size: usize,

    /// Magnitude mapped to byte 0 (decibels)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (decibels)
    pub max_decibels: f32,

    /// Temporal smoothing between consecutive spectra (0 = none, <1)
    pub smoothing: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            min_decibels: -100.0,
            max_decibels: -30.0,
            smoothing: 0.8,
        }
    }
}

impl AnalyzerConfig {
    /// Number of frequency bins produced per spectrum
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(format!(
                "FFT size must be a power of 2, got {}",
                self.fft_size
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!("smoothing must be in [0, 1), got {}", self.smoothing));
        }
        Ok(())
    }
}

/// Band layout and sampling budget for the four audio features
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Minimum time between spectrum samples (seconds); 1/30 = 30 Hz
    pub sampling_interval_s: f64,

    /// Bass bin range
    pub bass_bins: Range<usize>,

    /// Mid bin range
    pub mid_bins: Range<usize>,

    /// High-mid bin range
    pub high_mid_bins: Range<usize>,

    /// Treble bin range (stops one short of the last bin)
    pub treble_bins: Range<usize>,

    /// Sensitivity at which features pass through unscaled
    pub neutral_sensitivity: f32,

    /// Sensitivity on startup
    pub default_sensitivity: i32,

    /// Range the interactive controls may move sensitivity within
    pub min_sensitivity: i32,
    pub max_sensitivity: i32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sampling_interval_s: 1.0 / 30.0,
            bass_bins: 0..30,
            mid_bins: 30..120,
            high_mid_bins: 120..250,
            treble_bins: 250..255,
            neutral_sensitivity: 5.0,
            default_sensitivity: 5,
            min_sensitivity: 1,
            max_sensitivity: 10,
        }
    }
}

impl FeatureConfig {
    /// Band ranges in feature order (bass, mid, high-mid, treble)
    pub fn bands(&self) -> [Range<usize>; 4] {
        [
            self.bass_bins.clone(),
            self.mid_bins.clone(),
            self.high_mid_bins.clone(),
            self.treble_bins.clone(),
        ]
    }

    /// Validate against the number of bins the analyser produces
    pub fn validate(&self, bin_count: usize) -> Result<(), String> {
        if !(self.sampling_interval_s > 0.0) {
            return Err(format!(
                "sampling interval must be > 0, got {}",
                self.sampling_interval_s
            ));
        }
        for (name, band) in ["bass", "mid", "high_mid", "treble"]
            .iter()
            .zip(self.bands())
        {
            if band.is_empty() {
                return Err(format!("{} band {:?} is empty", name, band));
            }
            if band.end > bin_count {
                return Err(format!(
                    "{} band {:?} exceeds the {} available bins",
                    name, band, bin_count
                ));
            }
        }
        if self.neutral_sensitivity <= 0.0 {
            return Err("neutral sensitivity must be > 0".to_string());
        }
        if self.min_sensitivity > self.max_sensitivity {
            return Err(format!(
                "sensitivity range {}..={} is empty",
                self.min_sensitivity, self.max_sensitivity
            ));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    pub const BLOCK_SIZE: usize = 128;
}
