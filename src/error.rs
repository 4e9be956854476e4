use std::io;
use std::path::PathBuf;

/// Problems with the scare image. These are fatal: nothing is shown without it.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid animated image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no frames: {}", .0.display())]
    EmptyAnimation(PathBuf),

    #[error("failed to create texture for frame {frame} of {}: {reason}", path.display())]
    Texture {
        path: PathBuf,
        frame: usize,
        reason: String,
    },
}

/// Problems with a sound. Never fatal, the scare just runs silent.
#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("sound not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open sound {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode sound {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("audio worker stopped")]
    WorkerGone,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("probability must be between 0.0 and 1.0, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("dwell must be a positive number of seconds, got {0}")]
    InvalidDwell(f32),

    #[error("unknown preset \"{0}\"")]
    UnknownPreset(String),
}
