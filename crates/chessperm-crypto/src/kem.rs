//! ML-KEM-768 key encapsulation.
//!
//! A fresh keypair is generated for every message. The encapsulation key is
//! used once and dropped; the decapsulation key travels to the receiver as
//! the private-key artifact.
//!
//! Decapsulation never fails on a well-sized ciphertext. ML-KEM rejects
//! implicitly: a mismatched key or a modified ciphertext produces an
//! unrelated shared secret, and the AEAD tag is what catches it.

use chessperm_core::SharedSecret;
use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{Ciphertext, Encoded, EncodedSizeUser, KemCore, MlKem768};
use rand::{CryptoRng, RngCore};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{CryptoError, Result};

/// Encapsulation (public) key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 1184;

/// Decapsulation (private) key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 2400;

/// KEM ciphertext length in bytes.
pub const CIPHERTEXT_LEN: usize = 1088;

/// Shared secret length in bytes.
pub const SHARED_SECRET_LEN: usize = 32;

type EncapsulationKey = <MlKem768 as KemCore>::EncapsulationKey;
type DecapsulationKey = <MlKem768 as KemCore>::DecapsulationKey;

/// An ML-KEM-768 encapsulation key.
#[derive(Clone)]
pub struct KemPublicKey(EncapsulationKey);

impl KemPublicKey {
    /// Encoded key bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    /// Parse an encoded encapsulation key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded = Encoded::<EncapsulationKey>::try_from(bytes).map_err(|_| {
            CryptoError::Primitive(format!(
                "public key must be {PUBLIC_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(EncapsulationKey::from_bytes(&encoded)))
    }
}

impl fmt::Debug for KemPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "KemPublicKey({}...)", hex::encode(&bytes[..8]))
    }
}

/// An ML-KEM-768 decapsulation key, held as its encoded bytes.
///
/// This is the private-key artifact handed to the receiver. It exports as
/// lowercase hex, never prints through `Debug`, and zeroizes on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct KemPrivateKey(Zeroizing<Vec<u8>>);

impl KemPrivateKey {
    /// Wrap encoded decapsulation key bytes. Length must be exact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey(format!(
                "expected {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(Zeroizing::new(bytes.to_vec())))
    }

    /// Parse hex text. Surrounding whitespace is ignored.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(text.trim())
                .map_err(|e| CryptoError::InvalidPrivateKey(format!("not valid hex: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0.as_slice()))
    }

    fn decapsulation_key(&self) -> Result<DecapsulationKey> {
        let mut encoded = Encoded::<DecapsulationKey>::try_from(self.0.as_slice())
            .map_err(|_| CryptoError::InvalidPrivateKey("wrong length".into()))?;
        let dk = DecapsulationKey::from_bytes(&encoded);
        encoded.as_mut_slice().zeroize();
        Ok(dk)
    }
}

impl fmt::Debug for KemPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KemPrivateKey(..)")
    }
}

/// A fresh ML-KEM-768 keypair.
#[derive(Debug)]
pub struct KemKeyPair {
    pub public: KemPublicKey,
    pub private: KemPrivateKey,
}

impl KemKeyPair {
    /// Generate a keypair from the given RNG.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let (dk, ek) = MlKem768::generate(rng);
        let mut encoded = dk.as_bytes();
        let private = KemPrivateKey(Zeroizing::new(encoded.to_vec()));
        encoded.as_mut_slice().zeroize();
        Self {
            public: KemPublicKey(ek),
            private,
        }
    }

    /// Split into public and private halves.
    pub fn into_parts(self) -> (KemPublicKey, KemPrivateKey) {
        (self.public, self.private)
    }
}

/// An ML-KEM-768 ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct KemCiphertext(Vec<u8>);

impl KemCiphertext {
    /// Wrap ciphertext bytes. Length must be exact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CIPHERTEXT_LEN {
            return Err(CryptoError::MalformedPayload(format!(
                "KEM ciphertext must be {CIPHERTEXT_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for KemCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KemCiphertext({}...)", hex::encode(&self.0[..8]))
    }
}

/// Encapsulate a fresh shared secret to `public`.
pub fn encapsulate<R: RngCore + CryptoRng>(
    public: &KemPublicKey,
    rng: &mut R,
) -> Result<(SharedSecret, KemCiphertext)> {
    let (ct, mut shared) = public
        .0
        .encapsulate(rng)
        .map_err(|_| CryptoError::Primitive("encapsulation failed".into()))?;
    Ok((take_shared_secret(shared.as_mut_slice()), KemCiphertext(ct.to_vec())))
}

/// Recover the shared secret from a ciphertext.
pub fn decapsulate(private: &KemPrivateKey, ciphertext: &KemCiphertext) -> Result<SharedSecret> {
    let dk = private.decapsulation_key()?;
    let ct = Ciphertext::<MlKem768>::try_from(ciphertext.as_bytes())
        .map_err(|_| CryptoError::MalformedPayload("KEM ciphertext has wrong length".into()))?;
    let mut shared = dk
        .decapsulate(&ct)
        .map_err(|_| CryptoError::Primitive("decapsulation failed".into()))?;
    Ok(take_shared_secret(shared.as_mut_slice()))
}

/// Copy the KEM's shared key out and wipe the source buffer.
fn take_shared_secret(bytes: &mut [u8]) -> SharedSecret {
    let mut out = Zeroizing::new([0u8; SHARED_SECRET_LEN]);
    out.copy_from_slice(bytes);
    bytes.zeroize();
    SharedSecret::from_bytes(*out)
}
