//! Core trait definitions

mod transport;

pub use transport::{IpcStream, Transport};
