//! Message types for the rich presence protocol
//!
//! Payloads are JSON objects. Optional fields are omitted when unset or
//! empty instead of being sent as `null`.
//!
//! # Message Flow
//!
//! 1. Client connects and sends a [`Handshake`] frame (opcode 0)
//! 2. Client sends [`Command`] frames (opcode 1) with `SET_ACTIVITY`
//!
//! Responses from the desktop application are not interpreted.

use serde::{Deserialize, Serialize};

/// Protocol version sent in the handshake.
pub const HANDSHAKE_VERSION: &str = "1";

/// Command name for presence updates.
pub const SET_ACTIVITY: &str = "SET_ACTIVITY";

/// Handshake payload: first frame on every new connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    /// Protocol version marker
    pub v: String,
    /// Application identifier
    pub client_id: String,
}

impl Handshake {
    /// Create a handshake for the current protocol version
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            v: HANDSHAKE_VERSION.to_string(),
            client_id: client_id.into(),
        }
    }
}

/// Command frame payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Command name
    pub cmd: String,
    /// Command arguments
    pub args: SetActivityArgs,
    /// Per-call unique token for correlation on the receiving side
    pub nonce: String,
}

impl Command {
    /// Build a `SET_ACTIVITY` command
    pub fn set_activity(pid: u32, activity: Activity, nonce: impl Into<String>) -> Self {
        Self {
            cmd: SET_ACTIVITY.to_string(),
            args: SetActivityArgs { pid, activity },
            nonce: nonce.into(),
        }
    }
}

/// Arguments of a `SET_ACTIVITY` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetActivityArgs {
    /// Process id of the publishing process
    pub pid: u32,
    /// The activity to display
    pub activity: Activity,
}

/// Rich presence activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// First status line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Second status line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Elapsed-time anchor
    #[serde(default, skip_serializing_if = "Timestamps::is_unset")]
    pub timestamps: Option<Timestamps>,

    /// Image and hover-text references
    #[serde(default, skip_serializing_if = "Assets::is_unset")]
    pub assets: Option<Assets>,
}

impl Activity {
    /// Create an empty activity
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the details line (empty strings are treated as unset)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = non_empty(details.into());
        self
    }

    /// Set the state line (empty strings are treated as unset)
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_empty(state.into());
        self
    }

    /// Set the start timestamp (Unix seconds)
    pub fn with_start(mut self, start: i64) -> Self {
        self.timestamps = Some(Timestamps { start: Some(start) });
        self
    }

    /// Set the assets
    pub fn with_assets(mut self, assets: Assets) -> Self {
        self.assets = Some(assets);
        self
    }
}

/// Activity timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Start time in Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl Timestamps {
    fn is_unset(value: &Option<Self>) -> bool {
        value.map_or(true, |t| t.start.is_none())
    }
}

/// Activity image assets and their hover texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Large image key
    #[serde(default, skip_serializing_if = "is_blank")]
    pub large_image: Option<String>,
    /// Large image hover text
    #[serde(default, skip_serializing_if = "is_blank")]
    pub large_text: Option<String>,
    /// Small image key
    #[serde(default, skip_serializing_if = "is_blank")]
    pub small_image: Option<String>,
    /// Small image hover text
    #[serde(default, skip_serializing_if = "is_blank")]
    pub small_text: Option<String>,
}

impl Assets {
    fn is_unset(value: &Option<Self>) -> bool {
        value.as_ref().map_or(true, |a| {
            is_blank(&a.large_image)
                && is_blank(&a.large_text)
                && is_blank(&a.small_image)
                && is_blank(&a.small_text)
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
