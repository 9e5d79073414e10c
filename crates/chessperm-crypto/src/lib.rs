//! # ChessPerm Crypto
//!
//! The randomized half of ChessPerm: ML-KEM-768 key encapsulation,
//! ChaCha20-Poly1305 sealing, and the payload envelope that binds them.
//!
//! All randomness is injected by the caller as `RngCore + CryptoRng`, so a
//! seeded RNG makes every operation here reproducible in tests.
//!
//! ## Key Types
//!
//! - [`KemKeyPair`] - A fresh encapsulation/decapsulation keypair
//! - [`KemPrivateKey`] - The private-key artifact, exportable as hex
//! - [`Payload`] - `format || kem_ciphertext || nonce || aead_ciphertext`

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod kem;

pub use cipher::{open, seal, Nonce, NONCE_LEN, TAG_LEN};
pub use envelope::{Format, Payload, HEADER_LEN, MIN_PAYLOAD_LEN};
pub use error::{CryptoError, Result};
pub use kem::{
    decapsulate, encapsulate, KemCiphertext, KemKeyPair, KemPrivateKey, KemPublicKey,
    CIPHERTEXT_LEN, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN,
};
