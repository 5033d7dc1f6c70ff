//! Presence session client
//!
//! Owns the single connection to the desktop application. Connecting walks
//! the ten candidate endpoints in order and keeps the first one that opens,
//! then sends the handshake. A failed presence write triggers exactly one
//! reconnect and one resend of the same frame; anything beyond that is
//! reported to the caller.

use rp_core::traits::{IpcStream, Transport};
use rp_core::time::NonceGenerator;
use rp_core::{ActivityError, ClientId, ConnectError, EndpointLocator, TransportError};
use rp_protocol::{Activity, Command, Frame, Handshake, Opcode};

use super::backoff::ExponentialBackoff;

/// Lifecycle of a [`SessionClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No open connection
    Unconnected,
    /// Handshake sent on an open connection
    Connected,
    /// Closed by the caller; terminal
    Closed,
}

/// Client for one logical presence session
pub struct SessionClient<T: Transport> {
    transport: T,
    client_id: ClientId,
    /// Fixed locator; None recomputes from the environment on each connect
    locator: Option<EndpointLocator>,
    stream: Option<T::Stream>,
    address: Option<String>,
    state: SessionState,
    nonces: NonceGenerator,
    pid: u32,
}

impl<T: Transport> SessionClient<T> {
    /// Create an unconnected session
    pub fn new(client_id: ClientId, transport: T) -> Self {
        Self {
            transport,
            client_id,
            locator: None,
            stream: None,
            address: None,
            state: SessionState::Unconnected,
            nonces: NonceGenerator::new(),
            pid: std::process::id(),
        }
    }

    /// Use a fixed endpoint locator instead of the environment
    pub fn with_locator(mut self, locator: EndpointLocator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// The client identifier sent in every handshake
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a handshaken connection is open
    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Address of the endpoint currently connected to
    pub fn connected_address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn locator(&self) -> EndpointLocator {
        self.locator.clone().unwrap_or_else(EndpointLocator::from_env)
    }

    /// Connect to the first reachable endpoint and send the handshake
    ///
    /// Any previously open connection is closed first. Candidates are tried
    /// sequentially; the first that opens wins and the rest are not touched.
    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        if self.state == SessionState::Closed {
            return Err(ConnectError::Closed);
        }
        self.drop_stream().await;

        let handshake =
            Frame::new(Opcode::Handshake, &Handshake::new(self.client_id.as_str()))?.encode();

        let candidates = self.locator().candidates();
        let mut last = None;

        for (index, address) in candidates.iter().enumerate() {
            tracing::debug!(index, address = %address, "Trying IPC endpoint");

            match self.transport.open(address).await {
                Ok(stream) => {
                    tracing::info!(index, address = %address, "Opened IPC endpoint");
                    return self.handshake(stream, address, &handshake).await;
                }
                Err(e) => {
                    tracing::debug!(
                        index,
                        address = %address,
                        error = %e,
                        "IPC endpoint unavailable"
                    );
                    last = Some(e);
                }
            }
        }

        Err(ConnectError::NoEndpoint {
            attempted: candidates.len(),
            last,
        })
    }

    async fn handshake(
        &mut self,
        mut stream: T::Stream,
        address: &str,
        frame: &[u8],
    ) -> Result<(), ConnectError> {
        if let Err(source) = stream.write_frame(frame).await {
            if let Err(e) = stream.close().await {
                tracing::debug!(error = %e, "Failed to close stream after handshake failure");
            }
            return Err(ConnectError::Handshake {
                address: address.to_string(),
                source,
            });
        }

        tracing::info!(address, client_id = %self.client_id, "Handshake sent");
        self.stream = Some(stream);
        self.address = Some(address.to_string());
        self.state = SessionState::Connected;
        Ok(())
    }

    /// Connect, repeating the whole candidate sweep up to `attempts` times
    ///
    /// Only "no endpoint" failures are retried; a handshake failure is
    /// returned immediately.
    pub async fn connect_with_retry(
        &mut self,
        attempts: u32,
        mut backoff: ExponentialBackoff,
    ) -> Result<(), ConnectError> {
        let attempts = attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.connect().await {
                Ok(()) => return Ok(()),
                Err(e @ ConnectError::NoEndpoint { .. }) if attempt < attempts => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        "Connect attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Publish an activity
    ///
    /// On a write failure the stale connection is closed, `connect` runs
    /// once, and the same frame is resent once. If either step fails the
    /// error carries both causes and the session is left unconnected.
    pub async fn set_activity(&mut self, activity: &Activity) -> Result<(), ActivityError> {
        if self.state == SessionState::Closed {
            return Err(ActivityError::Closed);
        }

        let command = Command::set_activity(self.pid, activity.clone(), self.nonces.next_nonce());
        let frame = Frame::new(Opcode::Frame, &command)?.encode();

        let original = match self.write(&frame).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        tracing::warn!(error = %original, "Presence write failed, reconnecting");
        self.drop_stream().await;

        if let Err(reconnect) = self.connect().await {
            return Err(ActivityError::Reconnect {
                original,
                reconnect,
            });
        }

        if let Err(retry) = self.write(&frame).await {
            self.drop_stream().await;
            return Err(ActivityError::Retry { original, retry });
        }

        tracing::info!("Presence resent after reconnect");
        Ok(())
    }

    async fn write(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        match self.stream.as_mut() {
            Some(stream) => stream.write_frame(frame).await,
            None => Err(TransportError::NotConnected),
        }
    }

    /// Release the connection, if any, and stay unconnected
    async fn drop_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.close().await {
                tracing::debug!(error = %e, "Failed to close IPC stream");
            }
        }
        self.address = None;
        if self.state != SessionState::Closed {
            self.state = SessionState::Unconnected;
        }
    }

    /// Close the session; safe to call more than once
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.drop_stream().await;
        self.state = SessionState::Closed;
        tracing::info!("Session closed");
    }
}
