//! Platform-neutral local stream transport

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use rp_core::config::AgentConfig;
use rp_core::traits::{IpcStream, Transport};
use rp_core::TransportError;
use rp_protocol::HEADER_SIZE;

use super::platform::{dial, RawStream};

/// Opens the desktop application's local socket / named pipe
#[derive(Debug, Clone)]
pub struct LocalTransport {
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl LocalTransport {
    /// Create a transport with explicit open and write bounds
    pub fn new(connect_timeout: Duration, write_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            write_timeout,
        }
    }

    /// Create a transport from the agent configuration
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.connect_timeout, config.write_timeout)
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

#[async_trait]
impl Transport for LocalTransport {
    type Stream = LocalStream;

    async fn open(&self, address: &str) -> Result<LocalStream, TransportError> {
        let stream = tokio::time::timeout(self.connect_timeout, dial(address))
            .await
            .map_err(|_| TransportError::Timeout {
                operation: "open",
                after: self.connect_timeout,
            })?
            .map_err(|source| TransportError::Open {
                address: address.to_string(),
                source,
            })?;

        Ok(LocalStream {
            stream: Some(stream),
            write_timeout: self.write_timeout,
        })
    }
}

/// An open connection to the desktop application
pub struct LocalStream {
    /// None once closed
    stream: Option<RawStream>,
    write_timeout: Duration,
}

impl LocalStream {
    /// Whether the stream is still open
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

async fn write_parts(stream: &mut RawStream, header: &[u8], payload: &[u8]) -> io::Result<()> {
    // write_all turns a zero-length write into ErrorKind::WriteZero
    stream.write_all(header).await?;
    stream.write_all(payload).await?;
    stream.flush().await
}

#[async_trait]
impl IpcStream for LocalStream {
    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;

        if frame.len() < HEADER_SIZE {
            return Err(TransportError::Write(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("frame of {} bytes is shorter than its header", frame.len()),
            )));
        }
        let (header, payload) = frame.split_at(HEADER_SIZE);

        tokio::time::timeout(self.write_timeout, write_parts(stream, header, payload))
            .await
            .map_err(|_| TransportError::Timeout {
                operation: "write",
                after: self.write_timeout,
            })?
            .map_err(TransportError::Write)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if let Some(mut stream) = self.stream.take() {
            // The peer may already be gone; the descriptor is released on drop either way
            if let Err(e) = stream.shutdown().await {
                tracing::debug!(error = %e, "Shutdown of IPC stream failed");
            }
        }
        Ok(())
    }
}
