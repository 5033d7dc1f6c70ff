//! Presence scheduler
//!
//! Publishes an activity once immediately and then on a fixed period. A
//! failed update is logged and the loop moves on to the next tick.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use rp_core::traits::Transport;
use rp_core::ActivityError;

use crate::activity::ActivitySource;
use crate::session::SessionClient;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Drives periodic presence updates over a session
pub struct PresenceScheduler<T: Transport, S: ActivitySource> {
    session: SessionClient<T>,
    source: S,
    interval: Duration,
    updates: u64,
    failures: u64,
}

impl<T: Transport, S: ActivitySource> PresenceScheduler<T, S> {
    /// Create a scheduler; periods under one second are raised to one second
    pub fn new(session: SessionClient<T>, source: S, interval: Duration) -> Self {
        Self {
            session,
            source,
            interval: interval.max(MIN_INTERVAL),
            updates: 0,
            failures: 0,
        }
    }

    /// Period between updates
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn session(&self) -> &SessionClient<T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionClient<T> {
        &mut self.session
    }

    pub fn into_session(self) -> SessionClient<T> {
        self.session
    }

    /// Number of successful updates so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Number of failed updates so far
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Publish one update
    pub async fn tick(&mut self) -> Result<(), ActivityError> {
        let activity = self.source.activity();

        match self.session.set_activity(&activity).await {
            Ok(()) => {
                self.updates += 1;
                tracing::info!(
                    details = activity.details.as_deref().unwrap_or_default(),
                    state = activity.state.as_deref().unwrap_or_default(),
                    "Presence updated"
                );
                Ok(())
            }
            Err(e) => {
                self.failures += 1;
                tracing::error!("Presence update failed: {}", e);
                Err(e)
            }
        }
    }

    /// Tick immediately, then every interval, forever
    pub async fn run(&mut self) {
        tracing::info!("Publishing presence every {:?}", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            // Failures are already logged and counted; the next tick retries
            let _ = self.tick().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use rp_core::traits::IpcStream;
    use rp_core::{ClientId, EndpointLocator, TransportError};
    use rp_protocol::Activity;

    use crate::session::SessionState;

    /// Counts command frames; the endpoint can be taken down and brought back
    #[derive(Clone, Default)]
    struct CountingTransport {
        down: Arc<AtomicBool>,
        commands: Arc<AtomicUsize>,
    }

    struct CountingStream {
        down: Arc<AtomicBool>,
        commands: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        type Stream = CountingStream;

        async fn open(&self, address: &str) -> Result<CountingStream, TransportError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(TransportError::Open {
                    address: address.to_string(),
                    source: io::Error::from(io::ErrorKind::ConnectionRefused),
                });
            }
            Ok(CountingStream {
                down: Arc::clone(&self.down),
                commands: Arc::clone(&self.commands),
            })
        }
    }

    #[async_trait]
    impl IpcStream for CountingStream {
        async fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(TransportError::Write(io::Error::from(
                    io::ErrorKind::BrokenPipe,
                )));
            }
            if frame[0] == 1 {
                self.commands.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }

        async fn close(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    struct Fixed;

    impl ActivitySource for Fixed {
        fn activity(&mut self) -> Activity {
            Activity::new().with_details("testing")
        }
    }

    fn scheduler(
        transport: CountingTransport,
        interval: Duration,
    ) -> PresenceScheduler<CountingTransport, Fixed> {
        let session = SessionClient::new(ClientId::new("123456789012345678"), transport)
            .with_locator(EndpointLocator::with_base_dir("/run/test-ipc"));
        PresenceScheduler::new(session, Fixed, interval)
    }

    #[test]
    fn test_interval_has_a_floor() {
        let scheduler = scheduler(CountingTransport::default(), Duration::ZERO);
        assert_eq!(scheduler.interval(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_immediately_then_periodically() {
        let transport = CountingTransport::default();
        let mut scheduler = scheduler(transport.clone(), Duration::from_secs(30));

        let _ = tokio::time::timeout(Duration::from_secs(65), scheduler.run()).await;

        // t = 0, 30, 60
        assert_eq!(transport.commands.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.updates(), 3);
        assert_eq!(scheduler.failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_does_not_stop_the_loop() {
        let transport = CountingTransport::default();
        transport.down.store(true, Ordering::SeqCst);
        let mut scheduler = scheduler(transport.clone(), Duration::from_secs(10));

        let _ = tokio::time::timeout(Duration::from_secs(25), scheduler.run()).await;

        // t = 0, 10, 20 all fail
        assert_eq!(scheduler.failures(), 3);
        assert_eq!(scheduler.updates(), 0);
        assert_eq!(scheduler.session().state(), SessionState::Unconnected);
    }

    #[tokio::test]
    async fn test_tick_recovers_after_peer_returns() {
        let transport = CountingTransport::default();
        let mut scheduler = scheduler(transport.clone(), Duration::from_secs(30));
        scheduler.session_mut().connect().await.unwrap();

        transport.down.store(true, Ordering::SeqCst);
        assert!(scheduler.tick().await.is_err());
        assert_eq!(scheduler.session().state(), SessionState::Unconnected);

        transport.down.store(false, Ordering::SeqCst);
        scheduler.tick().await.unwrap();

        assert_eq!(scheduler.session().state(), SessionState::Connected);
        assert_eq!(transport.commands.load(Ordering::SeqCst), 1);
        assert_eq!((scheduler.updates(), scheduler.failures()), (1, 1));
    }

    #[tokio::test]
    async fn test_into_session_returns_the_session() {
        let mut scheduler = scheduler(CountingTransport::default(), Duration::from_secs(30));
        scheduler.tick().await.unwrap();

        let mut session = scheduler.into_session();
        assert!(session.is_connected());
        session.close().await;
        assert_eq!(session.state(), SessionState::Closed);
    }
}
