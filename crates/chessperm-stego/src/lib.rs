//! # ChessPerm Stego
//!
//! Hides a byte payload in the least significant bits of a lossless raster
//! image and recovers it blindly from the image alone.
//!
//! ## Key Types
//!
//! - [`CarrierImage`] - The image a payload is embedded into
//! - [`StegoImage`] - A carrier after embedding; always written as PNG
//! - [`FrameHeader`] - `"CPS" || version || length`, the first 64 embedded bits
//!
//! The codec knows nothing about what the payload contains.

pub mod codec;
pub mod error;
pub mod frame;
pub mod image;

pub use codec::{embed, extract, max_payload_len, required_bits};
pub use error::{Result, StegoError};
pub use frame::{FrameHeader, HEADER_BITS, MAGIC, VERSION};
pub use self::image::{
    capacity_bits, CarrierImage, StegoImage, DEFAULT_CARRIER_HEIGHT, DEFAULT_CARRIER_WIDTH,
};
