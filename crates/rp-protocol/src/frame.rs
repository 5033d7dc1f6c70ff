//! Frame header encoding/decoding
//!
//! The frame format uses an 8-byte header followed by a JSON payload:
//! - opcode: 4 bytes (u32, little-endian)
//! - payload_length: 4 bytes (u32, little-endian)
//!
//! There is no padding and no checksum.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::ProtocolError;

/// Size of the frame header in bytes
pub const HEADER_SIZE: usize = 8;

/// Maximum payload size accepted in either direction (16MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Operation code carried in every frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    /// First frame on a new connection: protocol version and client id
    Handshake = 0,
    /// Command frame (e.g. `SET_ACTIVITY`)
    Frame = 1,
}

impl Opcode {
    /// Convert from the raw header value
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Handshake),
            1 => Some(Self::Frame),
            _ => None,
        }
    }

    /// Raw header value
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Frame header: operation code and payload length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Operation code of the frame
    pub opcode: Opcode,
    /// Length of the payload in bytes
    pub payload_length: u32,
}

impl FrameHeader {
    /// Create a new frame header
    pub fn new(opcode: Opcode, payload_length: u32) -> Self {
        Self {
            opcode,
            payload_length,
        }
    }

    /// Encode the header into a byte buffer
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.put_u32_le(self.opcode.as_u32());
        dst.put_u32_le(self.payload_length);
    }

    /// Decode a header from a byte buffer
    ///
    /// Returns None if there aren't enough bytes in the buffer.
    /// Returns Err if the opcode is unknown; nothing is consumed in that case.
    pub fn decode(src: &mut BytesMut) -> Result<Option<Self>, ProtocolError> {
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }

        let raw_opcode = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        let opcode = Opcode::from_u32(raw_opcode).ok_or(ProtocolError::UnknownOpcode(raw_opcode))?;

        src.advance(4);
        let payload_length = src.get_u32_le();

        Ok(Some(Self {
            opcode,
            payload_length,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = FrameHeader::new(Opcode::Frame, 12345);

        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        header.encode(&mut buf);

        assert_eq!(buf.len(), HEADER_SIZE);

        let decoded = FrameHeader::decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, header);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_header_is_little_endian() {
        let mut buf = BytesMut::new();
        FrameHeader::new(Opcode::Frame, 0x0102).encode(&mut buf);

        assert_eq!(&buf[..], &[1, 0, 0, 0, 0x02, 0x01, 0, 0]);
    }

    #[test]
    fn test_handshake_opcode_is_zero() {
        let mut buf = BytesMut::new();
        FrameHeader::new(Opcode::Handshake, 7).encode(&mut buf);

        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..], &[7, 0, 0, 0]);
    }

    #[test]
    fn test_insufficient_bytes() {
        let mut buf = BytesMut::from(&[0u8; 4][..]);
        let result = FrameHeader::decode(&mut buf).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_unknown_opcode() {
        let mut buf = BytesMut::from(&[9, 0, 0, 0, 10, 0, 0, 0][..]);
        let result = FrameHeader::decode(&mut buf);
        assert!(matches!(result, Err(ProtocolError::UnknownOpcode(9))));
        assert_eq!(buf.len(), HEADER_SIZE);
    }
}
