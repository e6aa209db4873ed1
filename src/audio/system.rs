//! Audio playback (WAV file or Glicol synth) with on-demand spectrum analysis.
//!
//! The cpal output callback renders the program, writes it to the device and
//! appends a mono copy to a short history. The render thread reads that
//! history only when the feature extractor asks for a spectrum.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glicol::Engine;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::analyzer::SpectrumAnalyzer;
use super::source::AudioSource;
use super::synthesis::GLICOL_COMPOSITION;
use crate::error::AppError;
use crate::params::{audio_constants::BLOCK_SIZE, AnalyzerConfig, FeatureConfig};

/// Mono PCM decoded from a WAV file
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_s(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode a WAV file to mono f32, averaging channels.
pub fn decode_wav(path: &Path) -> Result<DecodedAudio, AppError> {
    let wav_err = |source| AppError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let reader = hound::WavReader::open(path).map_err(wav_err)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(wav_err)?,
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()
                .map_err(wav_err)?
        }
    };

    let samples: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    if samples.is_empty() {
        return Err(AppError::EmptyAudio(path.to_path_buf()));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// What the output callback renders
enum Program {
    File {
        audio: Arc<DecodedAudio>,
        /// Read position in source samples
        position: f64,
        /// Source samples advanced per device frame
        step: f64,
    },
    Synth(Box<Engine<BLOCK_SIZE>>),
}

/// State shared with the output callback
struct Playback {
    program: Program,
    /// Most recent mono output, oldest first
    history: Vec<f32>,
    history_len: usize,
}

/// Append to the history, draining in bulk once it reaches twice `keep`
fn push_history(history: &mut Vec<f32>, keep: usize, sample: f32) {
    history.push(sample);
    if history.len() >= keep * 2 {
        let excess = history.len() - keep;
        history.drain(0..excess);
    }
}

impl Playback {
    /// Fill an interleaved output buffer. Returns `false` when a file has run out.
    fn render(&mut self, data: &mut [f32], channels: usize) -> bool {
        let frames = data.len() / channels;
        let mut finished = false;

        match &mut self.program {
            Program::File {
                audio,
                position,
                step,
            } => {
                for frame in 0..frames {
                    let index = *position as usize;
                    let sample = match audio.samples.get(index) {
                        Some(s) => *s,
                        None => {
                            finished = true;
                            0.0
                        }
                    };
                    *position += *step;
                    data[frame * channels..(frame + 1) * channels].fill(sample);
                    push_history(&mut self.history, self.history_len, sample);
                }
            }
            Program::Synth(engine) => {
                let mut frame = 0;
                // Generate multiple blocks if needed to fill the entire buffer
                while frame < frames {
                    let (buffers, _) = engine.next_block(vec![]);
                    let count = (frames - frame).min(BLOCK_SIZE);
                    for i in 0..count {
                        // Hard clip to ±0.5 to protect ears and speakers
                        let left = buffers[0][i].clamp(-0.5, 0.5);
                        let right = buffers[1][i].clamp(-0.5, 0.5);
                        let out = (frame + i) * channels;
                        data[out] = left;
                        if channels > 1 {
                            data[out + 1] = right;
                            data[out + 2..out + channels].fill(0.0);
                        }
                        push_history(&mut self.history, self.history_len, 0.5 * (left + right));
                    }
                    frame += count;
                }
            }
        }

        !finished
    }

    fn rewind(&mut self) {
        if let Program::File { position, .. } = &mut self.program {
            *position = 0.0;
        }
        self.history.clear();
    }

    /// True once a file has been read past its last sample
    fn has_ended(&self) -> bool {
        match &self.program {
            Program::File {
                audio, position, ..
            } => *position as usize >= audio.samples.len(),
            Program::Synth(_) => false,
        }
    }

    /// Ready to resume: a file that has ended starts again from the beginning.
    /// Returns whether it rewound.
    fn resume(&mut self) -> bool {
        let ended = self.has_ended();
        if ended {
            self.rewind();
        }
        ended
    }
}

/// Audio output plus the analyser the visuals read from
pub struct AudioSystem {
    playback: Arc<Mutex<Playback>>,
    playing: Arc<AtomicBool>,
    analyzer: SpectrumAnalyzer,
    /// Copy of the playback history taken for each analysis
    window: Vec<f32>,
    sensitivity: i32,
    min_sensitivity: i32,
    max_sensitivity: i32,
    description: String,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Play a WAV file. Starts paused.
    pub fn from_wav(
        path: &Path,
        analyzer: AnalyzerConfig,
        features: &FeatureConfig,
    ) -> Result<Self, AppError> {
        let audio = decode_wav(path)?;
        log::info!(
            "Loaded {} ({:.1}s @ {}Hz)",
            path.display(),
            audio.duration_s(),
            audio.sample_rate
        );
        let source_rate = audio.sample_rate as f64;
        let audio = Arc::new(audio);
        let description = format!("file {}", path.display());

        Self::start(description, analyzer, features, move |device_rate| {
            Ok(Program::File {
                audio,
                position: 0.0,
                step: source_rate / device_rate as f64,
            })
        })
    }

    /// Play the built-in Glicol composition. Starts paused.
    pub fn synth(analyzer: AnalyzerConfig, features: &FeatureConfig) -> Result<Self, AppError> {
        Self::start(
            "procedural synth".to_string(),
            analyzer,
            features,
            |device_rate| {
                let mut engine = Engine::<BLOCK_SIZE>::new();
                engine.set_sr(device_rate as usize);
                engine.update_with_code(GLICOL_COMPOSITION);
                engine
                    .update()
                    .map_err(|e| AppError::Synthesis(format!("{:?}", e)))?;
                Ok(Program::Synth(Box::new(engine)))
            },
        )
    }

    fn start(
        description: String,
        analyzer: AnalyzerConfig,
        features: &FeatureConfig,
        program: impl FnOnce(u32) -> Result<Program, AppError>,
    ) -> Result<Self, AppError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AppError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(AppError::AudioDevice(format!(
                "unsupported output sample format {:?}",
                config.sample_format()
            )));
        }

        let device_rate = config.sample_rate().0;
        let channels = config.channels().max(1) as usize;
        log::info!(
            "Audio: {} @ {}Hz, {} channel(s), source: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            device_rate,
            channels,
            description
        );

        let playback = Arc::new(Mutex::new(Playback {
            program: program(device_rate)?,
            history: Vec::with_capacity(analyzer.fft_size * 2),
            history_len: analyzer.fft_size,
        }));
        let playing = Arc::new(AtomicBool::new(false));

        let playback_cb = Arc::clone(&playback);
        let playing_cb = Arc::clone(&playing);
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if !playing_cb.load(Ordering::Relaxed) {
                    data.fill(0.0);
                    return;
                }
                let Ok(mut playback) = playback_cb.lock() else {
                    data.fill(0.0);
                    return;
                };
                if !playback.render(data, channels) {
                    playing_cb.store(false, Ordering::Relaxed);
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            playback,
            playing,
            analyzer: SpectrumAnalyzer::new(analyzer),
            window: Vec::new(),
            sensitivity: features.default_sensitivity,
            min_sensitivity: features.min_sensitivity,
            max_sensitivity: features.max_sensitivity,
            description,
            _stream: stream,
        })
    }

    pub fn play(&mut self) {
        let rewound = match self.playback.lock() {
            Ok(mut playback) => playback.resume(),
            Err(_) => false,
        };
        if rewound {
            self.analyzer.reset();
        }
        self.playing.store(true, Ordering::Relaxed);
        log::info!("Playback started ({})", self.description);
    }

    pub fn pause(&mut self) {
        self.playing.store(false, Ordering::Relaxed);
        log::info!("Playback paused");
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and rewind to the start
    pub fn stop(&mut self) {
        self.playing.store(false, Ordering::Relaxed);
        if let Ok(mut playback) = self.playback.lock() {
            playback.rewind();
        }
        self.analyzer.reset();
        log::info!("Playback stopped");
    }

    /// Move sensitivity by `delta` within the configured range
    pub fn adjust_sensitivity(&mut self, delta: i32) {
        let next = (self.sensitivity + delta).clamp(self.min_sensitivity, self.max_sensitivity);
        if next != self.sensitivity {
            self.sensitivity = next;
            log::info!("Sensitivity: {}", next);
        }
    }
}

impl AudioSource for AudioSystem {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    fn sensitivity(&self) -> i32 {
        self.sensitivity
    }

    fn frequency_data(&mut self, out: &mut Vec<u8>) -> bool {
        {
            let Ok(playback) = self.playback.lock() else {
                return false;
            };
            self.window.clear();
            self.window.extend_from_slice(&playback.history);
        }
        self.analyzer.analyze(&self.window, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(name: &str, spec: hound::WavSpec, frames: &[[i16; 2]]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("dimensional-av-{}-{}.wav", name, std::process::id()));
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for frame in frames {
            for s in frame.iter().take(spec.channels as usize) {
                writer.write_sample(*s).unwrap();
            }
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_decode_stereo_wav_downmixes() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = write_wav("stereo", spec, &[[16384, 0], [-16384, -16384], [0, 0]]);

        let audio = decode_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(audio.sample_rate, 22050);
        assert_eq!(audio.samples.len(), 3);
        assert!((audio.samples[0] - 0.25).abs() < 1e-4);
        assert!((audio.samples[1] + 0.5).abs() < 1e-4);
        assert_eq!(audio.samples[2], 0.0);
    }

    #[test]
    fn test_decode_empty_wav_is_an_error() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = write_wav("empty", spec, &[]);

        let result = decode_wav(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AppError::EmptyAudio(_))));
    }

    #[test]
    fn test_decode_missing_file_is_an_error() {
        let result = decode_wav(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(result, Err(AppError::Wav { .. })));
    }

    #[test]
    fn test_file_playback_renders_and_finishes() {
        let audio = Arc::new(DecodedAudio {
            samples: vec![0.1, 0.2, 0.3],
            sample_rate: 44100,
        });
        let mut playback = Playback {
            program: Program::File {
                audio,
                position: 0.0,
                step: 1.0,
            },
            history: Vec::new(),
            history_len: 4,
        };

        let mut data = [0.0f32; 4]; // 2 stereo frames
        assert!(playback.render(&mut data, 2));
        assert_eq!(data, [0.1, 0.1, 0.2, 0.2]);

        assert!(!playback.render(&mut data, 2));
        assert_eq!(data, [0.3, 0.3, 0.0, 0.0]);
        assert_eq!(playback.history, vec![0.1, 0.2, 0.3, 0.0]);

        playback.rewind();
        assert!(playback.history.is_empty());
        assert!(playback.render(&mut data, 2));
        assert_eq!(data[0], 0.1);
    }

    #[test]
    fn test_ended_file_restarts_on_resume() {
        let audio = Arc::new(DecodedAudio {
            samples: vec![0.1, 0.2],
            sample_rate: 44100,
        });
        let mut playback = Playback {
            program: Program::File {
                audio,
                position: 0.0,
                step: 1.0,
            },
            history: Vec::new(),
            history_len: 4,
        };

        let mut data = [0.0f32; 4];
        assert!(!playback.has_ended());
        assert!(!playback.render(&mut data, 1));
        assert!(playback.has_ended());

        assert!(playback.resume());
        assert!(!playback.has_ended());
        assert!(playback.render(&mut data[..1], 1));
        assert_eq!(data[0], 0.1);
    }

    #[test]
    fn test_resume_mid_file_keeps_position() {
        let audio = Arc::new(DecodedAudio {
            samples: vec![0.1, 0.2, 0.3],
            sample_rate: 44100,
        });
        let mut playback = Playback {
            program: Program::File {
                audio,
                position: 0.0,
                step: 1.0,
            },
            history: Vec::new(),
            history_len: 4,
        };

        let mut data = [0.0f32; 1];
        assert!(playback.render(&mut data, 1));
        assert!(!playback.resume());
        assert!(playback.render(&mut data, 1));
        assert_eq!(data[0], 0.2);
    }

    #[test]
    fn test_history_is_bounded() {
        let audio = Arc::new(DecodedAudio {
            samples: vec![0.5; 1000],
            sample_rate: 44100,
        });
        let mut playback = Playback {
            program: Program::File {
                audio,
                position: 0.0,
                step: 1.0,
            },
            history: Vec::new(),
            history_len: 16,
        };
        let mut data = [0.0f32; 200];
        for _ in 0..5 {
            playback.render(&mut data, 1);
            assert!(playback.history.len() < 32);
        }
        assert!(playback.history.len() >= 16);
    }
}
