//! Error types for modalshift-core.

use thiserror::Error;

/// Configuration errors. The audio path itself never returns errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0}. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(f64),

    #[error("Invalid block size: {0}. Must be at least 1 frame")]
    InvalidBlockSize(usize),

    #[error("Invalid channel count: {channels} (supported: 1..={max})")]
    InvalidChannelCount { channels: usize, max: usize },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
