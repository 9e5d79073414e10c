//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chessperm::{Encrypted, Engine, EngineConfig};
use chessperm_core::KeyInput;
use chessperm_stego::CarrierImage;
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Morphy vs. Duke Karl / Count Isouard, Paris 1858.
pub const OPERA_GAME: &str = r#"[Event "Paris"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7
8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7
14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0"#;

/// A short opening as SAN tokens.
pub const ITALIAN_OPENING: [&str; 6] = ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"];

/// A deterministic RNG.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// A single-colour opaque carrier.
pub fn flat_carrier(width: u32, height: u32, rgb: [u8; 3]) -> CarrierImage {
    CarrierImage::from_rgba(RgbaImage::from_pixel(
        width,
        height,
        Rgba([rgb[0], rgb[1], rgb[2], 0xff]),
    ))
}

/// A textured carrier whose alpha channel varies per pixel.
pub fn translucent_carrier(width: u32, height: u32) -> CarrierImage {
    CarrierImage::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 7) as u8,
            (y * 11) as u8,
            (x + y) as u8,
            ((x * 13 + y * 17) % 256) as u8,
        ])
    }))
}

/// An engine with fast Argon2 settings and a seeded RNG.
pub struct TestFixture {
    pub engine: Engine,
    pub rng: ChaCha20Rng,
}

impl TestFixture {
    /// Create with the default seed.
    pub fn new() -> Self {
        Self::with_seed(0x5eed)
    }

    /// Create with a specific RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(EngineConfig::for_tests(), seed)
    }

    /// Create with a custom engine config.
    pub fn with_config(config: EngineConfig, seed: u64) -> Self {
        Self {
            engine: Engine::new(config),
            rng: seeded_rng(seed),
        }
    }

    /// Encrypt into the default carrier, panicking on failure.
    pub fn encrypt(&mut self, input: &KeyInput, message: &[u8]) -> Encrypted {
        self.engine
            .encrypt(&mut self.rng, input, message, None)
            .expect("encrypt failed")
    }

    /// Encrypt into `carrier`, panicking on failure.
    pub fn encrypt_into(
        &mut self,
        input: &KeyInput,
        message: &[u8],
        carrier: &CarrierImage,
    ) -> Encrypted {
        self.engine
            .encrypt(&mut self.rng, input, message, Some(carrier))
            .expect("encrypt failed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
