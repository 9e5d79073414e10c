//! ChaCha20-Poly1305 authenticated encryption.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload as AeadPayload},
    ChaCha20Poly1305,
};
use chessperm_core::SymmetricKey;
use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

/// A 96-bit nonce for ChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_LEN]);

impl Nonce {
    /// Draw a fresh nonce from the given RNG.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

fn cipher(key: &SymmetricKey) -> Result<ChaCha20Poly1305> {
    ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Primitive(e.to_string()))
}

/// Encrypt `plaintext`, authenticating `aad` alongside it.
///
/// Output is `ciphertext || tag`, `plaintext.len() + TAG_LEN` bytes.
pub fn seal(key: &SymmetricKey, nonce: &Nonce, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    cipher(key)?
        .encrypt(
            chacha20poly1305::Nonce::from_slice(&nonce.0),
            AeadPayload { msg: plaintext, aad },
        )
        .map_err(|_| CryptoError::Primitive("encryption failed".into()))
}

/// Decrypt and verify. Any mismatch yields [`CryptoError::AuthFailure`].
pub fn open(key: &SymmetricKey, nonce: &Nonce, ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_LEN {
        return Err(CryptoError::AuthFailure);
    }
    cipher(key)?
        .decrypt(
            chacha20poly1305::Nonce::from_slice(&nonce.0),
            AeadPayload { msg: ciphertext, aad },
        )
        .map_err(|_| CryptoError::AuthFailure)
}
