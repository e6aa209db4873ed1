//! Audio playback, spectrum analysis and band feature extraction.
//!
//! Playback (WAV file or Glicol synth) runs on the cpal callback thread. The
//! visualization pulls a spectrum through [`AudioSource`] and reduces it to
//! four band features at a capped rate.

mod analyzer;
mod features;
mod source;
mod synthesis;
mod system;

// Re-export public types
pub use analyzer::{hann_window, magnitude_to_byte, SpectrumAnalyzer};
pub use features::{AudioFeatures, AudioReading, FeatureExtractor};
pub use source::{AudioSource, SilentSource, StaticSpectrum};
pub use synthesis::GLICOL_COMPOSITION;
pub use system::{decode_wav, AudioSystem, DecodedAudio};
