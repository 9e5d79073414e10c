//! LSB embedding and blind extraction.
//!
//! Bits go into the least significant bit of R, G and B, pixels in
//! row-major order, channels R then G then B within a pixel, and each byte
//! MSB-first. Alpha is never touched, so no channel moves by more than one.
//!
//! The first 64 embedded bits are the [`FrameHeader`]; the payload follows.

use crate::error::{Result, StegoError};
use crate::frame::{FrameHeader, HEADER_BITS, HEADER_LEN};
use crate::image::{CarrierImage, StegoImage};

/// Embedding slots of an RGBA8 buffer: R, G and B of each pixel, in order.
fn slots_mut(raw: &mut [u8]) -> impl Iterator<Item = &mut u8> {
    raw.chunks_exact_mut(4).flat_map(|px| px[..3].iter_mut())
}

fn slots(raw: &[u8]) -> impl Iterator<Item = u8> + '_ {
    raw.chunks_exact(4).flat_map(|px| px[..3].iter().copied())
}

fn bits_msb_first(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1))
}

/// Largest payload, in bytes, a carrier with `capacity_bits` can hold.
pub fn max_payload_len(capacity_bits: u64) -> u64 {
    capacity_bits.saturating_sub(HEADER_BITS) / 8
}

/// Bits needed to embed a payload of `payload_len` bytes.
pub fn required_bits(payload_len: usize) -> u64 {
    HEADER_BITS + payload_len as u64 * 8
}

/// Embed `payload` into a copy of `carrier`.
///
/// Nothing is written unless the whole frame fits.
pub fn embed(payload: &[u8], carrier: &CarrierImage) -> Result<StegoImage> {
    let capacity_bits = carrier.capacity_bits();
    let needed_bits = required_bits(payload.len());
    let payload_len = u32::try_from(payload.len()).map_err(|_| StegoError::InsufficientCapacity {
        needed_bits,
        capacity_bits,
    })?;
    if needed_bits > capacity_bits {
        return Err(StegoError::InsufficientCapacity {
            needed_bits,
            capacity_bits,
        });
    }

    let header = FrameHeader::new(payload_len).to_bytes();
    let bits = bits_msb_first(&header).chain(bits_msb_first(payload));

    let mut rgba = carrier.as_rgba().clone();
    for (slot, bit) in slots_mut(&mut rgba).zip(bits) {
        *slot = (*slot & 0xfe) | bit;
    }
    Ok(StegoImage::from_rgba(rgba))
}

/// Extract the payload from a stego image, using nothing else.
pub fn extract(stego: &StegoImage) -> Result<Vec<u8>> {
    let capacity_bits = stego.capacity_bits();
    if capacity_bits < HEADER_BITS {
        return Err(StegoError::NoFrame);
    }

    let mut lsbs = slots(stego.as_rgba()).map(|v| v & 1);
    let mut next_byte = || {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | lsbs.next().unwrap_or(0);
        }
        byte
    };

    let mut header = [0u8; HEADER_LEN];
    for b in header.iter_mut() {
        *b = next_byte();
    }
    let frame = FrameHeader::parse(&header)?;

    let available = max_payload_len(capacity_bits);
    let declared = frame.payload_len as u64;
    if declared > available {
        return Err(StegoError::LengthOutOfBounds {
            declared,
            available,
        });
    }

    Ok((0..declared).map(|_| next_byte()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn carrier(w: u32, h: u32) -> CarrierImage {
        CarrierImage::synthesize(w, h).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let c = carrier(32, 32);
        let stego = embed(b"hello stego", &c).unwrap();
        assert_eq!(extract(&stego).unwrap(), b"hello stego");
    }

    #[test]
    fn test_empty_payload() {
        let stego = embed(b"", &carrier(8, 8)).unwrap();
        assert!(extract(&stego).unwrap().is_empty());
    }

    #[test]
    fn test_capacity_boundary() {
        // 10x10x3 = 300 bits; 300 - 64 = 236 bits = 29 whole bytes.
        let c = carrier(10, 10);
        assert_eq!(max_payload_len(c.capacity_bits()), 29);

        let fits = vec![0xa5u8; 29];
        let stego = embed(&fits, &c).unwrap();
        assert_eq!(extract(&stego).unwrap(), fits);

        let before = c.clone();
        let err = embed(&[0xa5u8; 30], &c).unwrap_err();
        assert!(matches!(
            err,
            StegoError::InsufficientCapacity {
                needed_bits: 304,
                capacity_bits: 300
            }
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_tiny_carrier() {
        // 4 pixels hold 12 bits, less than a header.
        let c = carrier(2, 2);
        assert!(matches!(embed(b"", &c), Err(StegoError::InsufficientCapacity { .. })));
        let blank = StegoImage::from_rgba(c.as_rgba().clone());
        assert!(matches!(extract(&blank), Err(StegoError::NoFrame)));
    }

    #[test]
    fn test_bit_order() {
        let black = image::Rgba([0, 0, 0, 0xff]);
        let c = CarrierImage::from_rgba(image::RgbaImage::from_pixel(8, 8, black));
        let stego = embed(&[0x80], &c).unwrap();
        let raw = stego.as_rgba().as_raw();
        // 'C' = 0b0100_0011 in the first three slots: 0, 1, 0.
        assert_eq!(&raw[..4], &[0, 1, 0, 0xff]);
        // Payload starts at bit 64 = pixel 21, slot 1 (G); 0x80 MSB set.
        assert_eq!(raw[21 * 4 + 1], 1);
        assert_eq!(raw[21 * 4 + 2], 0);
    }

    #[test]
    fn test_perturbation_bound_and_alpha() {
        let base = carrier(24, 24);
        let mut rgba = base.as_rgba().clone();
        for (i, p) in rgba.pixels_mut().enumerate() {
            p.0[3] = (i % 256) as u8;
        }
        let c = CarrierImage::from_rgba(rgba);
        let stego = embed(&[0xff; 150], &c).unwrap();

        for (a, b) in c.as_rgba().pixels().zip(stego.as_rgba().pixels()) {
            for ch in 0..3 {
                assert!((a.0[ch] as i16 - b.0[ch] as i16).abs() <= 1);
            }
            assert_eq!(a.0[3], b.0[3]);
        }
    }

    #[test]
    fn test_survives_png() {
        let c = carrier(40, 40);
        let payload: Vec<u8> = (0..=255).collect();
        let stego = embed(&payload, &c).unwrap();
        let reloaded = StegoImage::decode(&stego.to_png().unwrap()).unwrap();
        assert_eq!(extract(&reloaded).unwrap(), payload);
    }

    #[test]
    fn test_no_frame_in_plain_carrier() {
        let black = image::Rgba([0, 0, 0, 0xff]);
        let c = CarrierImage::from_rgba(image::RgbaImage::from_pixel(16, 16, black));
        let plain = StegoImage::from_rgba(c.as_rgba().clone());
        assert!(matches!(extract(&plain), Err(StegoError::NoFrame)));
    }

    #[test]
    fn test_declared_length_out_of_bounds() {
        let c = carrier(10, 10);
        let mut stego = embed(&[1, 2, 3], &c).unwrap();
        // Set the top bit of the length field (bit 32, first bit of byte 4).
        let raw: &mut [u8] = stego.as_rgba_mut();
        let slot = 32;
        let idx = (slot / 3) * 4 + slot % 3;
        raw[idx] |= 1;
        assert!(matches!(
            extract(&stego),
            Err(StegoError::LengthOutOfBounds { available: 29, .. })
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let c = carrier(10, 10);
        let mut stego = embed(&[1, 2, 3], &c).unwrap();
        // Version byte occupies bits 24..32; flip its second-lowest bit.
        let raw: &mut [u8] = stego.as_rgba_mut();
        let slot = 30;
        let idx = (slot / 3) * 4 + slot % 3;
        raw[idx] ^= 1;
        assert!(matches!(extract(&stego), Err(StegoError::UnsupportedVersion(3))));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            payload in proptest::collection::vec(any::<u8>(), 0..200),
            w in 20u32..48,
            h in 20u32..48,
        ) {
            let c = carrier(w, h);
            match embed(&payload, &c) {
                Ok(stego) => prop_assert_eq!(extract(&stego).unwrap(), payload),
                Err(StegoError::InsufficientCapacity { .. }) => {
                    prop_assert!(required_bits(payload.len()) > c.capacity_bits())
                }
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }
    }
}
