//! Error types for the crypto layer.

use thiserror::Error;

/// Errors that can occur in the KEM, cipher or envelope.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// AEAD tag verification failed.
    ///
    /// Deliberately carries no detail: a wrong seed, a wrong private key and
    /// a tampered ciphertext are indistinguishable.
    #[error("authentication failed")]
    AuthFailure,

    /// Private key bytes or hex text could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Envelope bytes are too short or inconsistent.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Envelope format byte is not one we understand.
    #[error("unsupported payload format: {0}")]
    UnsupportedFormat(u8),

    /// A primitive failed in a way that should not happen.
    #[error("crypto primitive failure: {0}")]
    Primitive(String),
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
