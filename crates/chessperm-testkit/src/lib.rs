//! # ChessPerm Testkit
//!
//! Testing utilities for ChessPerm.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Seeded RNGs, a fast-config engine, synthetic carriers and sample games
//! - **Generators**: Proptest strategies for legal move sequences, passwords and messages
//! - **Vectors**: Input pairs that must (or must not) canonicalize to the same seed
//!
//! ## Test Fixtures
//!
//! ```rust
//! use chessperm_testkit::fixtures::{TestFixture, OPERA_GAME};
//! use chessperm_core::KeyInput;
//!
//! let mut fixture = TestFixture::with_seed(7);
//! let input = KeyInput::pgn(OPERA_GAME).unwrap();
//! let out = fixture.encrypt(&input, b"hello");
//! let back = fixture.engine.decrypt(&out.stego, &out.private_key, &input).unwrap();
//! assert_eq!(back, b"hello");
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use chessperm_testkit::generators::legal_game;
//!
//! proptest! {
//!     #[test]
//!     fn transcript_seed_is_deterministic(moves in legal_game(1..40)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{flat_carrier, seeded_rng, translucent_carrier, TestFixture};
pub use generators::{legal_game, message, password};
pub use vectors::{all_vectors, verify_all_vectors, EquivalenceVector};
