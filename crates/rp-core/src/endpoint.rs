//! Endpoint discovery for the desktop application's IPC channel
//!
//! The desktop application binds one of ten well-known local addresses.
//! On Windows these are named pipes; elsewhere they are unix domain socket
//! files inside the runtime directory:
//!
//! 1. `$XDG_RUNTIME_DIR`
//! 2. `$TMPDIR`
//! 3. `/tmp`
//!
//! Candidates are tried in index order and there is no other discovery
//! mechanism, so both the order and the fallback chain matter.

use std::path::{Path, PathBuf};

/// Number of candidate endpoints (indices 0..=9)
pub const CANDIDATE_COUNT: usize = 10;

/// File / pipe name prefix; the candidate index is appended
pub const IPC_NAME_PREFIX: &str = "discord-ipc-";

/// Runtime directory environment variable (checked first)
pub const RUNTIME_DIR_VAR: &str = "XDG_RUNTIME_DIR";

/// Temporary directory environment variable (checked second)
pub const TEMP_DIR_VAR: &str = "TMPDIR";

/// Directory used when neither variable is set
pub const FALLBACK_DIR: &str = "/tmp";

/// Computes the ordered list of candidate IPC addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointLocator {
    kind: LocatorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LocatorKind {
    /// Socket files under a base directory
    Directory(PathBuf),
    /// Windows named pipes
    NamedPipe,
}

impl EndpointLocator {
    /// Locator for the current platform, reading the environment
    ///
    /// The environment is read on every call, so constructing a fresh
    /// locator before each connection attempt picks up changes.
    pub fn from_env() -> Self {
        if cfg!(windows) {
            Self::named_pipes()
        } else {
            let dir = resolve_base_dir(
                std::env::var(RUNTIME_DIR_VAR).ok(),
                std::env::var(TEMP_DIR_VAR).ok(),
            );
            tracing::debug!(dir = %dir.display(), "Resolved IPC socket directory");
            Self::with_base_dir(dir)
        }
    }

    /// Locator producing socket paths inside `dir`
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: LocatorKind::Directory(dir.into()),
        }
    }

    /// Locator producing Windows named pipe paths
    pub fn named_pipes() -> Self {
        Self {
            kind: LocatorKind::NamedPipe,
        }
    }

    /// Base directory for socket candidates (None for named pipes)
    pub fn base_dir(&self) -> Option<&Path> {
        match &self.kind {
            LocatorKind::Directory(dir) => Some(dir),
            LocatorKind::NamedPipe => None,
        }
    }

    /// The candidate address for one index
    pub fn candidate(&self, index: usize) -> String {
        match &self.kind {
            LocatorKind::NamedPipe => format!(r"\\.\pipe\{IPC_NAME_PREFIX}{index}"),
            LocatorKind::Directory(dir) => dir
                .join(format!("{IPC_NAME_PREFIX}{index}"))
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// All candidate addresses, in the order they must be tried
    pub fn candidates(&self) -> Vec<String> {
        (0..CANDIDATE_COUNT).map(|i| self.candidate(i)).collect()
    }
}

impl Default for EndpointLocator {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Pick the socket directory: runtime dir, then temp dir, then `/tmp`
///
/// Unset and empty values are both skipped.
pub fn resolve_base_dir(runtime_dir: Option<String>, temp_dir: Option<String>) -> PathBuf {
    runtime_dir
        .filter(|d| !d.is_empty())
        .or_else(|| temp_dir.filter(|d| !d.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}
