//! On-demand spectrum analysis producing byte magnitudes per frequency bin.
//!
//! Windowed FFT over the most recent `fft_size` samples, temporal smoothing of
//! bin magnitudes, then a decibel window mapped linearly onto 0–255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::AnalyzerConfig;

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Map a magnitude to a byte over the `[min_db, max_db]` window
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / (max_db - min_db);
    scaled.clamp(0.0, 255.0) as u8
}

pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| hann_window(i, config.fft_size))
            .collect();

        Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
            smoothed: vec![0.0; config.bin_count()],
            config,
        }
    }

    /// Analyse the newest `fft_size` samples of `samples` into `out`.
    ///
    /// Returns `false` (leaving `out` untouched) until enough samples exist.
    pub fn analyze(&mut self, samples: &[f32], out: &mut Vec<u8>) -> bool {
        let n = self.config.fft_size;
        if samples.len() < n {
            return false;
        }

        let recent = &samples[samples.len() - n..];
        for ((slot, sample), w) in self.buffer.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let scale = 1.0 / n as f32;
        out.clear();
        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[bin].norm() * scale;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            out.push(magnitude_to_byte(
                *smoothed,
                self.config.min_decibels,
                self.config.max_decibels,
            ));
        }
        true
    }

    /// Forget smoothing history (after a seek or stop)
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f32, sample_rate: f32, len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_magnitude_to_byte_window() {
        assert_eq!(magnitude_to_byte(0.0, -100.0, -30.0), 0);
        // Louder than max clamps
        assert_eq!(magnitude_to_byte(10f32.powf(-1.4), -100.0, -30.0), 255);
        assert_eq!(magnitude_to_byte(1.0, -100.0, -30.0), 255);
        // Quieter than min clamps
        assert_eq!(magnitude_to_byte(1e-6, -100.0, -30.0), 0);
        // -65 dB is halfway
        let mid = magnitude_to_byte(10f32.powf(-3.25), -100.0, -30.0);
        assert!((126..=128).contains(&mid), "mid = {}", mid);
    }

    #[test]
    fn test_needs_a_full_window() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());
        let mut out = vec![7u8; 3];
        assert!(!analyzer.analyze(&[0.0; 100], &mut out));
        assert_eq!(out, vec![7u8; 3]);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());
        let mut out = Vec::new();
        assert!(analyzer.analyze(&[0.0; 512], &mut out));
        assert_eq!(out.len(), 256);
        assert!(out.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_tone_peaks_at_its_bin() {
        // Wide decibel window so neighbouring bins don't saturate
        let config = AnalyzerConfig {
            smoothing: 0.0,
            min_decibels: -160.0,
            max_decibels: 0.0,
            ..AnalyzerConfig::default()
        };
        let mut analyzer = SpectrumAnalyzer::new(config);
        let sample_rate = 44100.0;
        // Bin 20 of a 512-point FFT
        let freq = 20.0 * sample_rate / 512.0;
        let samples = sine(freq, sample_rate, 512, 0.5);

        let mut out = Vec::new();
        assert!(analyzer.analyze(&samples, &mut out));

        let peak = out
            .iter()
            .enumerate()
            .max_by_key(|(_, b)| **b)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 20);
        assert!(out[20] > out[120]);
    }

    #[test]
    fn test_smoothing_lags_behind_input() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());
        let samples = sine(2000.0, 44100.0, 512, 0.5);

        let mut first = Vec::new();
        let mut second = Vec::new();
        analyzer.analyze(&samples, &mut first);
        analyzer.analyze(&samples, &mut second);

        let bin = (2000.0f32 * 512.0 / 44100.0).round() as usize;
        assert!(second[bin] > first[bin]);

        analyzer.reset();
        let mut third = Vec::new();
        analyzer.analyze(&samples, &mut third);
        assert_eq!(third[bin], first[bin]);
    }
}
