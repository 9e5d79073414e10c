//! The encrypted payload carried inside a stego image.
//!
//! ```text
//! format (1) || kem_ciphertext (1088) || nonce (12) || aead_ciphertext (>= 16)
//! ```
//!
//! The format byte and KEM ciphertext are authenticated as associated data,
//! so changing either one fails the AEAD tag rather than producing a
//! different plaintext.

use crate::cipher::{Nonce, NONCE_LEN, TAG_LEN};
use crate::error::{CryptoError, Result};
use crate::kem::{KemCiphertext, CIPHERTEXT_LEN};

/// Payload format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Format {
    /// ML-KEM-768 encapsulation, ChaCha20-Poly1305 body.
    MlKem768ChaCha20Poly1305 = 1,
}

impl Format {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(Format::MlKem768ChaCha20Poly1305),
            other => Err(CryptoError::UnsupportedFormat(other)),
        }
    }
}

/// Bytes before the AEAD ciphertext.
pub const HEADER_LEN: usize = 1 + CIPHERTEXT_LEN + NONCE_LEN;

/// Smallest valid payload: header plus a bare tag (empty message).
pub const MIN_PAYLOAD_LEN: usize = HEADER_LEN + TAG_LEN;

/// A parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub format: Format,
    pub kem_ciphertext: KemCiphertext,
    pub nonce: Nonce,
    /// Ciphertext with the Poly1305 tag appended.
    pub aead_ciphertext: Vec<u8>,
}

impl Payload {
    /// Associated data for the AEAD: `format || kem_ciphertext`.
    pub fn associated_data(format: Format, kem_ciphertext: &KemCiphertext) -> Vec<u8> {
        let mut aad = Vec::with_capacity(1 + CIPHERTEXT_LEN);
        aad.push(format.to_u8());
        aad.extend_from_slice(kem_ciphertext.as_bytes());
        aad
    }

    /// Associated data for this payload.
    pub fn aad(&self) -> Vec<u8> {
        Self::associated_data(self.format, &self.kem_ciphertext)
    }

    /// Total serialized length for a message of `message_len` bytes.
    pub const fn serialized_len(message_len: usize) -> usize {
        MIN_PAYLOAD_LEN + message_len
    }

    /// Serialize to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.aead_ciphertext.len());
        out.push(self.format.to_u8());
        out.extend_from_slice(self.kem_ciphertext.as_bytes());
        out.extend_from_slice(self.nonce.as_bytes());
        out.extend_from_slice(&self.aead_ciphertext);
        out
    }

    /// Parse wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (&format, rest) = bytes
            .split_first()
            .ok_or_else(|| CryptoError::MalformedPayload("empty payload".into()))?;
        let format = Format::from_u8(format)?;

        if bytes.len() < MIN_PAYLOAD_LEN {
            return Err(CryptoError::MalformedPayload(format!(
                "payload is {} bytes, minimum is {MIN_PAYLOAD_LEN}",
                bytes.len()
            )));
        }

        let (kem_ct, rest) = rest.split_at(CIPHERTEXT_LEN);
        let (nonce, aead_ciphertext) = rest.split_at(NONCE_LEN);

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(nonce);

        Ok(Self {
            format,
            kem_ciphertext: KemCiphertext::from_bytes(kem_ct)?,
            nonce: Nonce::from_bytes(nonce_bytes),
            aead_ciphertext: aead_ciphertext.to_vec(),
        })
    }
}
