//! Carrier and stego image handling.
//!
//! Every input is normalized to 8-bit RGBA. Only lossless formats are
//! accepted: a lossy re-encode would destroy the embedded bits, so JPEG,
//! WebP, GIF and anything else are rejected at the boundary. Output is
//! always PNG.

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, StegoError};

/// Default width of the synthesized carrier.
pub const DEFAULT_CARRIER_WIDTH: u32 = 256;

/// Default height of the synthesized carrier.
pub const DEFAULT_CARRIER_HEIGHT: u32 = 256;

/// Formats accepted for carriers and stego images.
const LOSSLESS_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Qoi,
    ImageFormat::Tiff,
];

/// Decode bytes of an accepted lossless format into RGBA8.
fn decode_lossless(bytes: &[u8]) -> Result<RgbaImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| StegoError::UnsupportedFormat("unrecognized image data".into()))?;
    if !LOSSLESS_FORMATS.contains(&format) {
        return Err(StegoError::UnsupportedFormat(format!("{format:?}")));
    }
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    Ok(decoded.to_rgba8())
}

fn encode_png(rgba: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    rgba.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Opaque texture with variation in every channel, so LSB changes do not
/// stand out against a flat background.
fn texture(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let r = (x.wrapping_mul(3) ^ y.wrapping_mul(5)) as u8;
        let g = ((x / 4).wrapping_add(y / 4).wrapping_mul(37) ^ (x.wrapping_mul(y) >> 3)) as u8;
        let b = (x.wrapping_mul(x).wrapping_add(y.wrapping_mul(y)) >> 2) as u8 ^ 0x5a;
        Rgba([r, g, b, 0xff])
    })
}

/// Capacity in bits of a `width` x `height` image: one LSB of R, G and B.
pub fn capacity_bits(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * 3
}

/// An image that will host a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierImage(RgbaImage);

impl CarrierImage {
    /// Wrap an RGBA buffer.
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self(rgba)
    }

    /// Decode a lossless image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_lossless(bytes).map(Self)
    }

    /// Read and decode a lossless image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    /// Synthesize a deterministic textured carrier.
    pub fn synthesize(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegoError::Image(format!(
                "carrier dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self(texture(width, height)))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Embedding capacity in bits, frame header included.
    pub fn capacity_bits(&self) -> u64 {
        capacity_bits(self.width(), self.height())
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }

    /// PNG-encode the carrier.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.0)
    }
}

/// A carrier with an embedded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StegoImage(RgbaImage);

impl StegoImage {
    /// Wrap an RGBA buffer.
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self(rgba)
    }

    /// Decode a lossless image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_lossless(bytes).map(Self)
    }

    /// Read and decode a lossless image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn capacity_bits(&self) -> u64 {
        capacity_bits(self.width(), self.height())
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }

    /// Mutable pixel access, for tamper tests.
    pub fn as_rgba_mut(&mut self) -> &mut RgbaImage {
        &mut self.0
    }

    /// PNG-encode the stego image.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.0)
    }

    /// PNG-encode and write to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}
