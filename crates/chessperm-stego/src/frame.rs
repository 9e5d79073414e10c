//! The versioned frame header written ahead of the payload.
//!
//! ```text
//! magic "CPS" (3) || version (1) || payload_len u32 BE (4)
//! ```

use crate::error::{Result, StegoError};

/// Frame magic.
pub const MAGIC: [u8; 3] = *b"CPS";

/// Current frame version.
pub const VERSION: u8 = 1;

/// Header length in bytes.
pub const HEADER_LEN: usize = 8;

/// Header length in embedded bits.
pub const HEADER_BITS: u64 = HEADER_LEN as u64 * 8;

/// A parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u8,
    pub payload_len: u32,
}

impl FrameHeader {
    /// Header for a current-version frame.
    pub const fn new(payload_len: u32) -> Self {
        Self {
            version: VERSION,
            payload_len,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..3].copy_from_slice(&MAGIC);
        out[3] = self.version;
        out[4..].copy_from_slice(&self.payload_len.to_be_bytes());
        out
    }

    /// Parse and validate magic and version. Length is checked by the codec.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self> {
        if bytes[..3] != MAGIC {
            return Err(StegoError::NoFrame);
        }
        let version = bytes[3];
        if version != VERSION {
            return Err(StegoError::UnsupportedVersion(version));
        }
        let payload_len = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(Self {
            version,
            payload_len,
        })
    }
}
