//! # ChessPerm Core
//!
//! Pure primitives for ChessPerm: move transcripts, seed canonicalization and
//! symmetric key derivation.
//!
//! This crate contains no I/O and no randomness. Everything here is a
//! deterministic function of its inputs, which is what lets a receiver
//! rebuild the sender's key material from the same game or password.
//!
//! ## Key Types
//!
//! - [`MoveTranscript`] - A replayed, canonicalized sequence of chess moves
//! - [`PasswordInput`] - A trimmed password string
//! - [`KeyInput`] - Either of the above, resolved to a [`Seed`] by the [`Canonicalizer`]
//! - [`SymmetricKey`] - Output of [`kdf::derive`]
//!
//! ## Canonicalization
//!
//! Transcripts are replayed from the standard starting position and every
//! move is re-rendered as minimal SAN before hashing. See [`canonical`].

pub mod canonical;
pub mod error;
pub mod kdf;
pub mod transcript;
pub mod types;

pub use canonical::{
    Argon2Params, Canonicalizer, KeyInput, PasswordInput, DEFAULT_MIN_PASSWORD_CHARS,
};
pub use error::{CoreError, Result};
pub use kdf::{derive, MESSAGE_KEY_LABEL};
pub use transcript::{MoveRecord, MoveTranscript};
pub use types::{Blake3Hash, Seed, SeedOrigin, SharedSecret, SymmetricKey, KEY_LEN};
