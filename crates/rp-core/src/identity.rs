//! Application identifier handed to the desktop application in the handshake

use std::fmt;

/// Identifier compiled into the binary, if one was provided at build time
pub const BUILD_TIME_CLIENT_ID: Option<&str> = option_env!("DISCORD_CLIENT_ID");

/// Shortest identifier considered plausible
pub const MIN_CLIENT_ID_LEN: usize = 17;

/// Longest identifier considered plausible
pub const MAX_CLIENT_ID_LEN: usize = 20;

/// Application identifier
///
/// Immutable once constructed. Construction never fails; use
/// [`ClientId::looks_valid`] to check plausibility before connecting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Create a client id, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self(id.trim().to_string())
    }

    /// Identifier injected at build time, if any
    pub fn build_time_default() -> Option<Self> {
        BUILD_TIME_CLIENT_ID
            .filter(|id| !id.trim().is_empty())
            .map(Self::new)
    }

    /// Whether the identifier has the usual shape: 17 to 20 ASCII digits
    pub fn looks_valid(&self) -> bool {
        (MIN_CLIENT_ID_LEN..=MAX_CLIENT_ID_LEN).contains(&self.0.len())
            && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Whether the identifier is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
