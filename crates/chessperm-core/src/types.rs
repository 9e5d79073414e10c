//! Strong type definitions for ChessPerm key material.
//!
//! Secret values are newtypes that zeroize on drop and never print their
//! contents through `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length in bytes of seeds, shared secrets and symmetric keys.
pub const KEY_LEN: usize = 32;

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake3Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Which input path produced a seed.
///
/// The origin is bound into key derivation so a transcript seed and a
/// password seed can never stand in for each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SeedOrigin {
    /// A replayed chess move transcript.
    Transcript = 1,
    /// A memory-hard stretched password.
    Password = 2,
}

impl SeedOrigin {
    /// Domain-separation tag used by the KDF.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Short name, matching the `input_type` values of the transport layer.
    pub fn as_str(self) -> &'static str {
        match self {
            SeedOrigin::Transcript => "pgn",
            SeedOrigin::Password => "password",
        }
    }
}

impl fmt::Display for SeedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical 32-byte output of either input path.
#[derive(Clone)]
pub struct Seed {
    origin: SeedOrigin,
    bytes: [u8; KEY_LEN],
}

impl Seed {
    /// Wrap raw seed bytes produced by `origin`.
    pub fn new(origin: SeedOrigin, bytes: [u8; KEY_LEN]) -> Self {
        Self { origin, bytes }
    }

    pub fn origin(&self) -> SeedOrigin {
        self.origin
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, ..)", self.origin)
    }
}

/// A shared secret produced by KEM encapsulation or decapsulation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_LEN]);

impl SharedSecret {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// A 256-bit symmetric key for the authenticated cipher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let h1 = Blake3Hash::hash(b"test data");
        let h2 = Blake3Hash::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Blake3Hash::hash(b"different data"));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let seed = Seed::new(SeedOrigin::Password, [0xab; 32]);
        let key = SymmetricKey::from_bytes([0xab; 32]);
        let shared = SharedSecret::from_bytes([0xab; 32]);

        for debug in [format!("{:?}", seed), format!("{:?}", key), format!("{:?}", shared)] {
            assert!(!debug.contains("ab"), "leaked bytes in {debug}");
        }
        assert_eq!(format!("{:?}", seed), "Seed(password, ..)");
    }

    #[test]
    fn test_seed_origin_tags_are_distinct() {
        assert_ne!(SeedOrigin::Transcript.to_u8(), SeedOrigin::Password.to_u8());
        assert_eq!(SeedOrigin::Transcript.as_str(), "pgn");
    }

    #[test]
    fn test_seed_origin_serde_names() {
        let json = serde_json::to_string(&SeedOrigin::Password).unwrap();
        assert_eq!(json, "\"password\"");
    }
}
