//! Local IPC transport
//!
//! [`LocalTransport`] opens unix domain sockets on unix and named pipes on
//! Windows. The platform is picked at compile time; both expose the same
//! [`rp_core::traits::Transport`] / [`rp_core::traits::IpcStream`] pair.

mod local;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use local::{LocalStream, LocalTransport};

#[cfg(unix)]
use unix as platform;
#[cfg(windows)]
use windows as platform;
