//! Symmetric key derivation.
//!
//! The message key is bound to both halves of the secret: the seed the
//! receiver can rebuild from the game or password, and the KEM shared secret
//! only the private-key holder can recover. Losing either one yields an
//! unrelated key.

use crate::types::{Seed, SharedSecret, SymmetricKey};

/// Blake3 derive-key context for symmetric keys.
///
/// **FROZEN**: changing this breaks every existing stego image.
pub const KDF_CONTEXT: &str = "chessperm 2024-06 symmetric key derivation v1";

/// Label for the AEAD key that protects the message.
pub const MESSAGE_KEY_LABEL: &str = "message-key";

/// Derive a symmetric key from a seed and a KEM shared secret.
///
/// Input encoding: `origin (u8) || label_len (u32 BE) || label || seed || shared`.
/// Seed and shared secret are fixed-length, so only the label needs a prefix.
pub fn derive(seed: &Seed, shared: &SharedSecret, label: &str) -> SymmetricKey {
    let mut hasher = blake3::Hasher::new_derive_key(KDF_CONTEXT);
    hasher.update(&[seed.origin().to_u8()]);
    hasher.update(&(label.len() as u32).to_be_bytes());
    hasher.update(label.as_bytes());
    hasher.update(seed.as_bytes());
    hasher.update(shared.as_bytes());
    SymmetricKey::from_bytes(*hasher.finalize().as_bytes())
}
