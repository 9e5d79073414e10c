//! Canonicalization of key input into a fixed-length [`Seed`].
//!
//! Two input paths exist and both end in the same 32-byte seed format:
//!
//! - **Transcript**: the canonical SAN of every ply, with its ply index, is
//!   hashed with Blake3 in derive-key mode. A transcript already carries
//!   plenty of entropy, so a fast hash is enough.
//! - **Password**: the trimmed UTF-8 bytes are stretched with Argon2id,
//!   because passwords carry far less entropy than a game.
//!
//! **CRITICAL**: the contexts, salt and encoding below are FROZEN. Changing
//! any of them makes every previously produced stego image undecryptable.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use crate::error::{CoreError, Result};
use crate::transcript::MoveTranscript;
use crate::types::{Seed, SeedOrigin, KEY_LEN};

/// Blake3 derive-key context for transcript seeds.
pub const TRANSCRIPT_CONTEXT: &str = "chessperm 2024-06 transcript seed v1";

/// Fixed Argon2 salt for password seeds.
///
/// The per-message KEM secret provides the per-message randomness; the
/// password seed itself must be reproducible from the password alone.
pub const PASSWORD_SALT: &[u8] = b"chessperm/password-seed/v1";

/// Default minimum password length, in characters, after trimming.
pub const DEFAULT_MIN_PASSWORD_CHARS: usize = 8;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Params {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Params {
    /// Minimal cost, for tests only.
    pub const fn insecure_fast() -> Self {
        Self {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn build(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| CoreError::KeyStretch(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// A password, trimmed of surrounding whitespace but otherwise untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordInput(Zeroizing<String>);

impl PasswordInput {
    /// Trim leading and trailing whitespace; case and inner content are kept.
    pub fn new(raw: &str) -> Self {
        Self(Zeroizing::new(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for PasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordInput(..)")
    }
}

/// The two ways a user can supply key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A chess game transcript.
    Transcript(MoveTranscript),
    /// A password.
    Password(PasswordInput),
}

impl KeyInput {
    /// Parse PGN movetext into a transcript input.
    pub fn pgn(movetext: &str) -> Result<Self> {
        MoveTranscript::parse(movetext).map(Self::Transcript)
    }

    /// Build a transcript input from SAN tokens.
    pub fn moves<I, S>(moves: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MoveTranscript::from_moves(moves).map(Self::Transcript)
    }

    /// Build a password input. Length is checked at canonicalization.
    pub fn password(raw: &str) -> Self {
        Self::Password(PasswordInput::new(raw))
    }

    /// The seed origin this input resolves to.
    pub fn origin(&self) -> SeedOrigin {
        match self {
            KeyInput::Transcript(_) => SeedOrigin::Transcript,
            KeyInput::Password(_) => SeedOrigin::Password,
        }
    }
}

impl From<MoveTranscript> for KeyInput {
    fn from(t: MoveTranscript) -> Self {
        Self::Transcript(t)
    }
}

impl From<PasswordInput> for KeyInput {
    fn from(p: PasswordInput) -> Self {
        Self::Password(p)
    }
}

/// Resolves a [`KeyInput`] to a [`Seed`].
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    argon2: Argon2Params,
    min_password_chars: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(Argon2Params::default(), DEFAULT_MIN_PASSWORD_CHARS)
    }
}

impl Canonicalizer {
    pub fn new(argon2: Argon2Params, min_password_chars: usize) -> Self {
        Self {
            argon2,
            min_password_chars: min_password_chars.max(1),
        }
    }

    /// Canonicalize either input kind.
    pub fn canonicalize(&self, input: &KeyInput) -> Result<Seed> {
        match input {
            KeyInput::Transcript(t) => Ok(Self::transcript_seed(t)),
            KeyInput::Password(p) => self.password_seed(p),
        }
    }

    /// Hash the canonical move list.
    pub fn transcript_seed(transcript: &MoveTranscript) -> Seed {
        let mut hasher = blake3::Hasher::new_derive_key(TRANSCRIPT_CONTEXT);
        hasher.update(&(transcript.len() as u32).to_be_bytes());
        for record in transcript.records() {
            hasher.update(&record.ply.to_be_bytes());
            hasher.update(&(record.san.len() as u32).to_be_bytes());
            hasher.update(record.san.as_bytes());
        }
        Seed::new(SeedOrigin::Transcript, *hasher.finalize().as_bytes())
    }

    /// Stretch a password with Argon2id.
    pub fn password_seed(&self, password: &PasswordInput) -> Result<Seed> {
        let chars = password.char_count();
        if chars == 0 {
            return Err(CoreError::InvalidPassword("password is empty".into()));
        }
        if chars < self.min_password_chars {
            return Err(CoreError::InvalidPassword(format!(
                "password must be at least {} characters",
                self.min_password_chars
            )));
        }

        let mut out = Zeroizing::new([0u8; KEY_LEN]);
        self.argon2
            .build()?
            .hash_password_into(password.as_str().as_bytes(), PASSWORD_SALT, out.as_mut())
            .map_err(|e| CoreError::KeyStretch(e.to_string()))?;

        Ok(Seed::new(SeedOrigin::Password, *out))
    }
}
