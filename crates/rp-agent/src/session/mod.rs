//! Session management: connect, handshake, publish, reconnect

mod backoff;
mod client;

pub use backoff::ExponentialBackoff;
pub use client::{SessionClient, SessionState};
