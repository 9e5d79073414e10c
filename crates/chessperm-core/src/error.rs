//! Error types for ChessPerm Core.

use thiserror::Error;

/// Errors that can occur while turning key input into a seed.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid move at ply {ply} ({token:?}): {reason}")]
    InvalidTranscript {
        ply: u32,
        token: String,
        reason: String,
    },

    #[error("transcript contains no moves")]
    EmptyTranscript,

    #[error("malformed movetext: {0}")]
    MalformedMovetext(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("key stretching failed: {0}")]
    KeyStretch(String),
}

impl CoreError {
    /// Whether the error comes from the caller's input rather than a primitive.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CoreError::KeyStretch(_))
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
