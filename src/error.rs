//! Error types for the morphology engine.

use thiserror::Error;

/// Errors reported by kernel construction and buffer adaptation.
///
/// Out-of-bounds queries and cancellation are not errors: they are defined
/// results of the engine and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid radius {0}: must be non-negative with a 2r+1 kernel side that fits in i32")]
    InvalidRadius(i64),

    #[error("expected an RGBA image with 4 channels, got {0}")]
    UnsupportedChannels(usize),

    #[error("buffer of length {len} does not hold a {width}x{height} RGBA image")]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
