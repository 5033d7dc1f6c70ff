//! Tokio codec for framed protocol messages

use bytes::{Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;
use crate::frame::{FrameHeader, Opcode, HEADER_SIZE, MAX_PAYLOAD_SIZE};

/// A complete frame: operation code and serialized payload
///
/// Frames are only built by [`Frame::new`] and the decoder, so the payload
/// never exceeds [`MAX_PAYLOAD_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    opcode: Opcode,
    payload: Bytes,
}

impl Frame {
    /// Serialize a message into a new frame
    ///
    /// Fails with `ProtocolError::Serialization` if the message cannot be
    /// represented as JSON, or `ProtocolError::PayloadTooLarge` if the
    /// result does not fit in a frame.
    pub fn new<T: Serialize>(opcode: Opcode, message: &T) -> Result<Self, ProtocolError> {
        let payload = serde_json::to_vec(message)?;
        check_payload_size(payload.len())?;

        Ok(Self {
            opcode,
            payload: Bytes::from(payload),
        })
    }

    /// Operation code of this frame
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Serialized JSON payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Header describing this frame
    pub fn header(&self) -> FrameHeader {
        FrameHeader::new(self.opcode, self.payload.len() as u32)
    }

    /// Total size on the wire (header plus payload)
    pub fn wire_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode into one contiguous buffer: header immediately followed by payload
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.header().encode(&mut buf);
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }

    /// Parse the payload as JSON
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

fn check_payload_size(size: usize) -> Result<(), ProtocolError> {
    if size > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLarge {
            size,
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(())
}

/// Codec for encoding/decoding protocol frames
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Current header being decoded (if any)
    pending_header: Option<FrameHeader>,
}

impl FrameCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self {
            pending_header: None,
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => match FrameHeader::decode(src)? {
                Some(h) => h,
                None => return Ok(None),
            },
        };

        let payload_len = header.payload_length as usize;
        check_payload_size(payload_len)?;

        if src.len() < payload_len {
            src.reserve(payload_len - src.len());
            self.pending_header = Some(header);
            return Ok(None);
        }

        let payload = src.split_to(payload_len).freeze();
        tracing::trace!(opcode = ?header.opcode, len = payload_len, "Decoded frame");

        Ok(Some(Frame {
            opcode: header.opcode,
            payload,
        }))
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        check_payload_size(frame.payload.len())?;

        frame.header().encode(dst);
        dst.extend_from_slice(&frame.payload);

        Ok(())
    }
}
