//! rp-agent: Rich presence publisher
//!
//! The agent connects to the desktop application's local IPC endpoint,
//! performs the handshake and publishes an activity on a fixed interval,
//! reconnecting once per failed update when the application restarts.

pub mod activity;
pub mod prompt;
pub mod scheduler;
pub mod session;
pub mod transport;

pub use activity::{ActivitySource, ClockActivity};
pub use scheduler::PresenceScheduler;
pub use session::{ExponentialBackoff, SessionClient, SessionState};
pub use transport::{LocalStream, LocalTransport};
