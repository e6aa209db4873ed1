//! Interface to whatever supplies the spectrum: a playing file, a synth, or nothing.

/// Audio collaborator read by the feature extractor.
///
/// The extractor never mutates playback state; `frequency_data` takes `&mut self`
/// only so implementations can keep analyser state (smoothing) between calls.
pub trait AudioSource {
    /// Whether audio is actively playing right now
    fn is_playing(&self) -> bool;

    /// User sensitivity setting (5 = neutral)
    fn sensitivity(&self) -> i32;

    /// Overwrite `out` with the current frequency-bin magnitudes (0–255).
    ///
    /// Returns `false` when no spectrum is available yet.
    fn frequency_data(&mut self, out: &mut Vec<u8>) -> bool;
}

/// Source used when no audio device is available: never plays
#[derive(Debug, Clone)]
pub struct SilentSource {
    pub sensitivity: i32,
}

impl Default for SilentSource {
    fn default() -> Self {
        Self { sensitivity: 5 }
    }
}

impl AudioSource for SilentSource {
    fn is_playing(&self) -> bool {
        false
    }

    fn sensitivity(&self) -> i32 {
        self.sensitivity
    }

    fn frequency_data(&mut self, _out: &mut Vec<u8>) -> bool {
        false
    }
}

/// Fixed spectrum, for tests and offline rendering
#[derive(Debug, Clone)]
pub struct StaticSpectrum {
    pub playing: bool,
    pub sensitivity: i32,
    pub magnitudes: Vec<u8>,
    /// Number of times the spectrum has been read
    pub reads: usize,
}

impl StaticSpectrum {
    pub fn new(magnitudes: Vec<u8>) -> Self {
        Self {
            playing: true,
            sensitivity: 5,
            magnitudes,
            reads: 0,
        }
    }

    /// Spectrum of `bins` bins all at `level`
    pub fn flat(bins: usize, level: u8) -> Self {
        Self::new(vec![level; bins])
    }
}

impl AudioSource for StaticSpectrum {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn sensitivity(&self) -> i32 {
        self.sensitivity
    }

    fn frequency_data(&mut self, out: &mut Vec<u8>) -> bool {
        if self.magnitudes.is_empty() {
            return false;
        }
        self.reads += 1;
        out.clear();
        out.extend_from_slice(&self.magnitudes);
        true
    }
}
