use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),
    #[error("Quality must be between 1 and 100, got {0}")]
    InvalidQuality(u32),
    #[error("Target size must be at least 1MB and yield a usable bitrate, got {0}MB")]
    InvalidTargetSize(u64),
    #[error("Could not determine video duration: {0}")]
    Duration(String),
    #[error("Probe failed: {0}")]
    Probe(String),
    #[error("Failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Encoder exited with {0}")]
    EncoderFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
