//! Error types for the ChessPerm pipeline.

use chessperm_core::CoreError;
use chessperm_crypto::CryptoError;
use chessperm_stego::StegoError;
use std::fmt;
use thiserror::Error;

/// The five outcomes a caller has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed transcript, password, private key, image or config.
    InvalidInput,
    /// The carrier is too small for the message.
    InsufficientCapacity,
    /// The stego image holds no readable payload.
    CorruptPayload,
    /// Wrong transcript, password or private key, or a tampered payload.
    AuthFailure,
    /// A primitive failed unexpectedly.
    InternalCryptoFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::InsufficientCapacity => "InsufficientCapacity",
            ErrorKind::CorruptPayload => "CorruptPayload",
            ErrorKind::AuthFailure => "AuthFailure",
            ErrorKind::InternalCryptoFailure => "InternalCryptoFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during encryption or decryption.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transcript or password error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// KEM, cipher or envelope error.
    #[error("{0}")]
    Crypto(#[from] CryptoError),

    /// Embedding, extraction or image error.
    #[error("{0}")]
    Stego(#[from] StegoError),

    /// Configuration could not be loaded.
    #[error("invalid config: {0}")]
    Config(String),
}

impl EngineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Core(CoreError::KeyStretch(_)) => ErrorKind::InternalCryptoFailure,
            EngineError::Core(_) => ErrorKind::InvalidInput,

            EngineError::Crypto(CryptoError::AuthFailure) => ErrorKind::AuthFailure,
            EngineError::Crypto(CryptoError::InvalidPrivateKey(_)) => ErrorKind::InvalidInput,
            EngineError::Crypto(CryptoError::MalformedPayload(_))
            | EngineError::Crypto(CryptoError::UnsupportedFormat(_)) => ErrorKind::CorruptPayload,
            EngineError::Crypto(CryptoError::Primitive(_)) => ErrorKind::InternalCryptoFailure,

            EngineError::Stego(StegoError::InsufficientCapacity { .. }) => {
                ErrorKind::InsufficientCapacity
            }
            EngineError::Stego(StegoError::NoFrame)
            | EngineError::Stego(StegoError::UnsupportedVersion(_))
            | EngineError::Stego(StegoError::LengthOutOfBounds { .. }) => ErrorKind::CorruptPayload,
            EngineError::Stego(StegoError::UnsupportedFormat(_))
            | EngineError::Stego(StegoError::Image(_))
            | EngineError::Stego(StegoError::Io(_)) => ErrorKind::InvalidInput,

            EngineError::Config(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases: Vec<(EngineError, ErrorKind)> = vec![
            (CoreError::EmptyTranscript.into(), ErrorKind::InvalidInput),
            (CoreError::InvalidPassword("short".into()).into(), ErrorKind::InvalidInput),
            (CoreError::KeyStretch("x".into()).into(), ErrorKind::InternalCryptoFailure),
            (CryptoError::AuthFailure.into(), ErrorKind::AuthFailure),
            (CryptoError::InvalidPrivateKey("x".into()).into(), ErrorKind::InvalidInput),
            (CryptoError::UnsupportedFormat(9).into(), ErrorKind::CorruptPayload),
            (CryptoError::MalformedPayload("x".into()).into(), ErrorKind::CorruptPayload),
            (CryptoError::Primitive("x".into()).into(), ErrorKind::InternalCryptoFailure),
            (
                StegoError::InsufficientCapacity {
                    needed_bits: 10,
                    capacity_bits: 5,
                }
                .into(),
                ErrorKind::InsufficientCapacity,
            ),
            (StegoError::NoFrame.into(), ErrorKind::CorruptPayload),
            (StegoError::UnsupportedVersion(2).into(), ErrorKind::CorruptPayload),
            (
                StegoError::LengthOutOfBounds {
                    declared: 10,
                    available: 5,
                }
                .into(),
                ErrorKind::CorruptPayload,
            ),
            (StegoError::UnsupportedFormat("Jpeg".into()).into(), ErrorKind::InvalidInput),
            (EngineError::Config("x".into()), ErrorKind::InvalidInput),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_auth_failure_message_is_generic() {
        let err = EngineError::from(CryptoError::AuthFailure);
        assert_eq!(err.to_string(), "authentication failed");
        assert_eq!(ErrorKind::AuthFailure.to_string(), "AuthFailure");
    }
}
