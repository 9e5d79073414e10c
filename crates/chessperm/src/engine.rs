//! The Engine: encryption and decryption pipelines.
//!
//! The engine is stateless apart from its configuration. Every call owns
//! its secrets (seed, shared secret, symmetric key) for its own duration
//! and they are zeroized when dropped, on error paths included.
//!
//! Logging carries step names and sizes only, never key material or input.

use chessperm_core::{kdf, Canonicalizer, KeyInput, Seed, MESSAGE_KEY_LABEL};
use chessperm_crypto::{
    decapsulate, encapsulate, open, seal, Format, KemKeyPair, KemPrivateKey, Nonce, Payload,
    MIN_PAYLOAD_LEN,
};
use chessperm_stego::{embed, extract, max_payload_len, CarrierImage, StegoImage};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::config::EngineConfig;
use crate::error::Result;

/// Output of [`Engine::encrypt`].
#[derive(Debug)]
pub struct Encrypted {
    /// The carrier with the payload embedded.
    pub stego: StegoImage,
    /// Decapsulation key the receiver needs alongside the game or password.
    pub private_key: KemPrivateKey,
}

/// Output of [`Engine::encrypt_png`].
#[derive(Debug)]
pub struct EncryptedBundle {
    /// PNG-encoded stego image.
    pub stego_png: Vec<u8>,
    /// Lowercase hex of the private key.
    pub private_key_hex: Zeroizing<String>,
}

/// The ChessPerm engine.
///
/// `Send + Sync`; share one instance freely. The RNG is passed per call.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    canonicalizer: Canonicalizer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        let canonicalizer = config.canonicalizer();
        Self {
            config,
            canonicalizer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve key input to a seed.
    pub fn canonicalize(&self, input: &KeyInput) -> Result<Seed> {
        let seed = self.canonicalizer.canonicalize(input)?;
        tracing::debug!(origin = %seed.origin(), "canonicalized key input");
        Ok(seed)
    }

    /// The carrier used when the caller supplies none.
    pub fn default_carrier(&self) -> Result<CarrierImage> {
        let dims = self.config.carrier;
        Ok(CarrierImage::synthesize(dims.width, dims.height)?)
    }

    /// Largest message, in bytes, that fits in `carrier` (or the default).
    pub fn capacity_for(&self, carrier: Option<&CarrierImage>) -> Result<usize> {
        let capacity_bits = match carrier {
            Some(c) => c.capacity_bits(),
            None => self.default_carrier()?.capacity_bits(),
        };
        let max_payload = max_payload_len(capacity_bits);
        let max_message = max_payload.saturating_sub(MIN_PAYLOAD_LEN as u64);
        Ok(usize::try_from(max_message).unwrap_or(usize::MAX))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pipelines
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt `message` under `input` and embed it in `carrier`.
    ///
    /// A fresh KEM keypair is generated per call; its private half is
    /// returned and must travel to the receiver.
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        input: &KeyInput,
        message: &[u8],
        carrier: Option<&CarrierImage>,
    ) -> Result<Encrypted> {
        let seed = self.canonicalize(input)?;

        let (public, private_key) = KemKeyPair::generate(rng).into_parts();
        let (shared, kem_ciphertext) = encapsulate(&public, rng)?;
        drop(public);

        let key = kdf::derive(&seed, &shared, MESSAGE_KEY_LABEL);
        let nonce = Nonce::generate(rng);
        let format = Format::MlKem768ChaCha20Poly1305;
        let aad = Payload::associated_data(format, &kem_ciphertext);
        let aead_ciphertext = seal(&key, &nonce, message, &aad)?;

        let payload = Payload {
            format,
            kem_ciphertext,
            nonce,
            aead_ciphertext,
        }
        .to_bytes();

        let default_carrier;
        let carrier = match carrier {
            Some(c) => c,
            None => {
                default_carrier = self.default_carrier()?;
                &default_carrier
            }
        };

        let stego = embed(&payload, carrier)?;
        tracing::info!(
            message_len = message.len(),
            payload_len = payload.len(),
            width = stego.width(),
            height = stego.height(),
            "message embedded"
        );

        Ok(Encrypted { stego, private_key })
    }

    /// Recover the message from `stego`.
    ///
    /// A wrong game, password or private key, and any tampering that gets
    /// past the frame header, all surface as the same authentication failure.
    pub fn decrypt(
        &self,
        stego: &StegoImage,
        private_key: &KemPrivateKey,
        input: &KeyInput,
    ) -> Result<Vec<u8>> {
        let bytes = extract(stego)?;
        let payload = Payload::from_bytes(&bytes)?;
        tracing::debug!(payload_len = bytes.len(), "payload extracted");

        let shared = decapsulate(private_key, &payload.kem_ciphertext)?;
        let seed = self.canonicalize(input)?;
        let key = kdf::derive(&seed, &shared, MESSAGE_KEY_LABEL);

        let message = open(&key, &payload.nonce, &payload.aead_ciphertext, &payload.aad())
            .map_err(|e| {
                tracing::debug!("payload failed authentication");
                e
            })?;
        tracing::info!(message_len = message.len(), "message recovered");
        Ok(message)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Encoded forms
    // ─────────────────────────────────────────────────────────────────────────

    /// [`encrypt`](Self::encrypt) over encoded carrier bytes, returning PNG
    /// bytes and hex key text.
    pub fn encrypt_png<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        input: &KeyInput,
        message: &[u8],
        carrier: Option<&[u8]>,
    ) -> Result<EncryptedBundle> {
        let carrier = carrier.map(CarrierImage::decode).transpose()?;
        let encrypted = self.encrypt(rng, input, message, carrier.as_ref())?;
        Ok(EncryptedBundle {
            stego_png: encrypted.stego.to_png()?,
            private_key_hex: encrypted.private_key.to_hex(),
        })
    }

    /// [`decrypt`](Self::decrypt) over encoded stego bytes and hex key text.
    pub fn decrypt_png(
        &self,
        stego: &[u8],
        private_key_hex: &str,
        input: &KeyInput,
    ) -> Result<Vec<u8>> {
        let stego = StegoImage::decode(stego)?;
        let private_key = KemPrivateKey::from_hex(private_key_hex)?;
        self.decrypt(&stego, &private_key, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn engine() -> Engine {
        Engine::new(EngineConfig::for_tests())
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_capacity_for_default_carrier() {
        let engine = engine();
        // 256 * 256 * 3 bits, minus the frame header, minus the envelope.
        let expected = (256 * 256 * 3 - 64) / 8 - MIN_PAYLOAD_LEN;
        assert_eq!(engine.capacity_for(None).unwrap(), expected);
    }

    #[test]
    fn test_capacity_for_tiny_carrier_is_zero() {
        let engine = engine();
        let tiny = CarrierImage::synthesize(4, 4).unwrap();
        assert_eq!(engine.capacity_for(Some(&tiny)).unwrap(), 0);
    }

    #[test]
    fn test_roundtrip_default_carrier() {
        let engine = engine();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let input = KeyInput::moves(["e4", "e5", "Nf3"]).unwrap();

        let out = engine.encrypt(&mut rng, &input, b"hello", None).unwrap();
        assert_eq!(out.stego.width(), 256);
        assert_eq!(engine.decrypt(&out.stego, &out.private_key, &input).unwrap(), b"hello");
    }

    #[test]
    fn test_invalid_input_before_any_work() {
        let engine = engine();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let err = engine
            .encrypt(&mut rng, &KeyInput::password("short"), b"hi", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_zero_sized_default_carrier_is_invalid_input() {
        let mut config = EngineConfig::for_tests();
        config.carrier.width = 0;
        let engine = Engine::new(config);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let input = KeyInput::moves(["d4"]).unwrap();
        let err = engine.encrypt(&mut rng, &input, b"hi", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
