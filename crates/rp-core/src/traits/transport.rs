//! Transport traits
//!
//! A [`Transport`] opens local byte-stream endpoints; the resulting
//! [`IpcStream`] writes encoded frames. Unix domain sockets and Windows
//! named pipes both sit behind these two traits so the session logic never
//! branches on the platform.

use async_trait::async_trait;

use crate::error::TransportError;

/// Opens connections to local IPC endpoints
#[async_trait]
pub trait Transport: Send + Sync {
    /// The open connection type
    type Stream: IpcStream;

    /// Open the endpoint at `address`
    async fn open(&self, address: &str) -> Result<Self::Stream, TransportError>;
}

/// An open local byte-stream connection
#[async_trait]
pub trait IpcStream: Send {
    /// Write one encoded frame
    ///
    /// `frame` is the contiguous header-plus-payload buffer. Implementations
    /// write the header bytes, then the payload bytes, without buffering or
    /// retrying. A short write or a broken/reset connection is a
    /// `TransportError::Write`.
    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Close the connection
    ///
    /// Must tolerate a connection that is already closed.
    async fn close(&mut self) -> Result<(), TransportError>;
}
