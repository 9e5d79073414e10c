//! Error types for the stego codec.

use thiserror::Error;

/// Errors that can occur while embedding, extracting or handling images.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The carrier cannot hold the frame header plus payload.
    #[error("carrier too small: need {needed_bits} bits, have {capacity_bits}")]
    InsufficientCapacity { needed_bits: u64, capacity_bits: u64 },

    /// The image does not start with a ChessPerm frame.
    #[error("no embedded frame found")]
    NoFrame,

    /// The frame uses a version this codec does not understand.
    #[error("unsupported frame version: {0}")]
    UnsupportedVersion(u8),

    /// The declared payload is longer than the image could hold.
    #[error("declared payload length {declared} exceeds available {available} bytes")]
    LengthOutOfBounds { declared: u64, available: u64 },

    /// The image is not in an accepted lossless format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Decoding or encoding failed.
    #[error("image error: {0}")]
    Image(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        StegoError::Image(e.to_string())
    }
}

/// Result type for stego operations.
pub type Result<T> = std::result::Result<T, StegoError>;
