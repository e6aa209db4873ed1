//! Four-band audio features, sampled at a capped rate.
//!
//! Each sample averages four contiguous bin ranges of a byte spectrum,
//! normalizes by 255 and scales by `sensitivity / 5`. The scaled values are
//! not clamped: sensitivity above neutral can push features past 1.0, and
//! everything downstream (angles, viewpoint, colour) takes them as-is.
//!
//! Between samples the previous features are reused untouched. While nothing
//! is playing every feature is held at zero.

use std::ops::Range;

use super::source::AudioSource;
use crate::params::FeatureConfig;

/// Normalized band intensities for one sampling tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioFeatures {
    pub bass: f32,
    pub mid: f32,
    pub high_mid: f32,
    pub treble: f32,
    /// Multiplier applied to the raw band averages (`sensitivity / 5`)
    pub gain: f32,
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            bass: 0.0,
            mid: 0.0,
            high_mid: 0.0,
            treble: 0.0,
            gain: 1.0,
        }
    }
}

impl AudioFeatures {
    pub fn bands(&self) -> [f32; 4] {
        [self.bass, self.mid, self.high_mid, self.treble]
    }

    /// Any band above the nominal [0, 1] range
    pub fn is_overdriven(&self) -> bool {
        self.bands().iter().any(|b| *b > 1.0)
    }
}

/// Features plus the playback state they were read under
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioReading {
    pub features: AudioFeatures,
    pub playing: bool,
}

/// Rate-limited reducer from spectrum to [`AudioFeatures`]
pub struct FeatureExtractor {
    config: FeatureConfig,
    current: AudioFeatures,
    last_sample_s: Option<f64>,
    spectrum: Vec<u8>,
    overdrive_reported: bool,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            config,
            current: AudioFeatures::default(),
            last_sample_s: None,
            spectrum: Vec::new(),
            overdrive_reported: false,
        }
    }

    /// Query the source, sampling only if a sample is due.
    ///
    /// `now_s` must not decrease between calls.
    pub fn update(&mut self, now_s: f64, source: &mut dyn AudioSource) -> AudioReading {
        if !source.is_playing() {
            self.current = AudioFeatures {
                gain: self.current.gain,
                ..AudioFeatures::default()
            };
            self.overdrive_reported = false;
            return AudioReading {
                features: self.current,
                playing: false,
            };
        }

        let due = match self.last_sample_s {
            Some(last) => now_s - last >= self.config.sampling_interval_s,
            None => true,
        };
        if due && source.frequency_data(&mut self.spectrum) && !self.spectrum.is_empty() {
            self.last_sample_s = Some(now_s);
            self.current = self.reduce(source.sensitivity());
            self.report_overdrive();
        }

        AudioReading {
            features: self.current,
            playing: true,
        }
    }

    fn reduce(&self, sensitivity: i32) -> AudioFeatures {
        let gain = sensitivity as f32 / self.config.neutral_sensitivity;
        let [bass, mid, high_mid, treble] = self
            .config
            .bands()
            .map(|band| band_average(&self.spectrum, band) * gain);
        AudioFeatures {
            bass,
            mid,
            high_mid,
            treble,
            gain,
        }
    }

    fn report_overdrive(&mut self) {
        if self.current.is_overdriven() && !self.overdrive_reported {
            log::warn!(
                "Audio features exceed 1.0 at gain {:.2} (bands {:?}); passing through unclamped",
                self.current.gain,
                self.current.bands()
            );
            self.overdrive_reported = true;
        }
    }
}

/// Mean magnitude over `band`, normalized to [0, 1]. Bins past the spectrum count as absent.
fn band_average(spectrum: &[u8], band: Range<usize>) -> f32 {
    let end = band.end.min(spectrum.len());
    let start = band.start.min(end);
    let bins = &spectrum[start..end];
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::source::{SilentSource, StaticSpectrum};
    use approx::assert_abs_diff_eq;

    fn banded_spectrum() -> Vec<u8> {
        let mut spectrum = vec![0u8; 256];
        spectrum[0..30].fill(255);
        spectrum[30..120].fill(51);
        spectrum[120..250].fill(102);
        spectrum[250..255].fill(204);
        spectrum[255] = 255; // outside every band
        spectrum
    }

    #[test]
    fn test_bands_average_and_normalize() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::new(banded_spectrum());

        let reading = extractor.update(0.0, &mut source);
        assert!(reading.playing);
        assert_abs_diff_eq!(reading.features.bass, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(reading.features.mid, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(reading.features.high_mid, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(reading.features.treble, 0.8, epsilon = 1e-6);
        assert_eq!(reading.features.gain, 1.0);
    }

    #[test]
    fn test_second_query_within_interval_is_unchanged() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::flat(256, 100);

        let first = extractor.update(1.0, &mut source);
        source.magnitudes = vec![200; 256];
        let second = extractor.update(1.0 + 0.02, &mut source);

        assert_eq!(first, second);
        assert_eq!(source.reads, 1);

        // Once the interval has passed, the new spectrum shows up
        let third = extractor.update(1.0 + 0.04, &mut source);
        assert!(third.features.bass > first.features.bass);
        assert_eq!(source.reads, 2);
    }

    #[test]
    fn test_idle_features_are_zero_regardless_of_data() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::flat(256, 255);

        let playing = extractor.update(0.0, &mut source);
        assert!(playing.features.bass > 0.0);

        source.playing = false;
        let idle = extractor.update(0.1, &mut source);
        assert!(!idle.playing);
        assert_eq!(idle.features.bands(), [0.0; 4]);
        // No spectrum read while idle
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn test_missing_data_keeps_previous_features() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::flat(256, 128);
        let first = extractor.update(0.0, &mut source);

        source.magnitudes.clear();
        let second = extractor.update(1.0, &mut source);
        assert_eq!(first.features, second.features);
    }

    #[test]
    fn test_sensitivity_scales_without_clamping() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::flat(256, 255);
        source.sensitivity = 10;

        let reading = extractor.update(0.0, &mut source);
        assert_abs_diff_eq!(reading.features.gain, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(reading.features.bass, 2.0, epsilon = 1e-6);
        assert!(reading.features.is_overdriven());
    }

    #[test]
    fn test_short_spectrum_leaves_missing_bands_at_zero() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = StaticSpectrum::flat(64, 255);

        let reading = extractor.update(0.0, &mut source);
        assert_abs_diff_eq!(reading.features.bass, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(reading.features.mid, 1.0, epsilon = 1e-6);
        assert_eq!(reading.features.high_mid, 0.0);
        assert_eq!(reading.features.treble, 0.0);
    }

    #[test]
    fn test_silent_source_never_samples() {
        let mut extractor = FeatureExtractor::new(FeatureConfig::default());
        let mut source = SilentSource::default();

        for step in 0..10 {
            let reading = extractor.update(step as f64, &mut source);
            assert!(!reading.playing);
            assert_eq!(reading.features, AudioFeatures::default());
        }
    }
}
