//! Errors from the I/O glue (configuration, audio devices, WAV files, GPU and window setup).
//!
//! The transform pipeline itself has no error paths; only acquiring resources can fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to decode WAV {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("WAV {0} contains no samples")]
    EmptyAudio(PathBuf),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("audio device error: {0}")]
    AudioDevice(String),

    #[error("audio synthesis error: {0}")]
    Synthesis(String),

    #[error("GPU initialisation failed: {0}")]
    Gpu(String),

    #[error("window system error: {0}")]
    Window(String),

    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<cpal::DefaultStreamConfigError> for AppError {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        AppError::AudioDevice(e.to_string())
    }
}

impl From<cpal::BuildStreamError> for AppError {
    fn from(e: cpal::BuildStreamError) -> Self {
        AppError::AudioDevice(e.to_string())
    }
}

impl From<cpal::PlayStreamError> for AppError {
    fn from(e: cpal::PlayStreamError) -> Self {
        AppError::AudioDevice(e.to_string())
    }
}
