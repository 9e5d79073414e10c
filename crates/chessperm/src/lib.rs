//! # ChessPerm
//!
//! Hide a message inside an ordinary-looking PNG, keyed by a chess game or
//! a password and protected by a post-quantum KEM.
//!
//! ## Overview
//!
//! The sender supplies a move transcript (or password) and a message and
//! gets back a stego image plus a private-key artifact. The receiver needs
//! all three pieces: the image, the private key, and the same game or
//! password.
//!
//! - **Canonicalization**: the game is replayed and reduced to a 32-byte seed;
//!   a password is stretched with Argon2id instead
//! - **KEM**: a fresh ML-KEM-768 keypair per message
//! - **Cipher**: ChaCha20-Poly1305 under a key bound to both the seed and the
//!   KEM shared secret
//! - **Stego**: LSB embedding behind a versioned frame header
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chessperm::{Engine, EngineConfig, KeyInput};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let input = KeyInput::moves(["e4", "e5", "Nf3"]).unwrap();
//!
//! let out = engine
//!     .encrypt(&mut rand::rngs::OsRng, &input, b"hello", None)
//!     .unwrap();
//! let message = engine.decrypt(&out.stego, &out.private_key, &input).unwrap();
//! assert_eq!(message, b"hello");
//! ```
//!
//! ## Re-exports
//!
//! - `chessperm::core` - Transcripts, canonicalization and key derivation
//! - `chessperm::crypto` - KEM, cipher and payload envelope
//! - `chessperm::stego` - Images and the LSB codec

pub mod config;
pub mod engine;
pub mod error;

// Re-export component crates
pub use chessperm_core as core;
pub use chessperm_crypto as crypto;
pub use chessperm_stego as stego;

// Re-export main types for convenience
pub use config::{CarrierConfig, EngineConfig, PasswordPolicy};
pub use engine::{Encrypted, EncryptedBundle, Engine};
pub use error::{EngineError, ErrorKind, Result};

pub use chessperm_core::{Argon2Params, KeyInput, MoveTranscript, PasswordInput, SeedOrigin};
pub use chessperm_crypto::KemPrivateKey;
pub use chessperm_stego::{CarrierImage, StegoImage};
