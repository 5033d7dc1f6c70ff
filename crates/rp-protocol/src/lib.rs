//! rp-protocol: Wire protocol for the rich presence IPC channel
//!
//! This crate defines the framing and message types spoken to the desktop
//! application over its local socket or named pipe.

pub mod codec;
pub mod error;
pub mod frame;
pub mod message;

pub use codec::{Frame, FrameCodec};
pub use error::ProtocolError;
pub use frame::{FrameHeader, Opcode, HEADER_SIZE, MAX_PAYLOAD_SIZE};
pub use message::{
    Activity, Assets, Command, Handshake, SetActivityArgs, Timestamps, HANDSHAKE_VERSION,
    SET_ACTIVITY,
};
