//! Time utilities: Unix timestamps and per-call nonces

use std::time::{SystemTime, UNIX_EPOCH};

/// Get the current Unix timestamp in seconds.
///
/// Returns 0 if the system clock is set before the Unix epoch.
pub fn current_time_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Get the current Unix timestamp in nanoseconds.
///
/// Returns 0 if the system clock is set before the Unix epoch.
pub fn current_time_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

/// Generates nonces from the nanosecond clock
///
/// Values are strictly increasing for a given generator, even if the clock
/// stalls or steps backwards.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: u128,
}

impl NonceGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Next nonce as a raw value
    pub fn next_value(&mut self) -> u128 {
        let now = current_time_nanos();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }

    /// Next nonce rendered as a decimal string
    pub fn next_nonce(&mut self) -> String {
        self.next_value().to_string()
    }
}
