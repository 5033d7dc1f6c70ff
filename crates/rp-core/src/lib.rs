//! rp-core: Core abstractions and configuration for the rich presence client
//!
//! This crate provides the endpoint locator, the transport traits, the
//! error taxonomy and the configuration structures used by the agent.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod identity;
pub mod time;
pub mod traits;

pub use endpoint::EndpointLocator;
pub use error::{ActivityError, ConfigError, ConnectError, TransportError};
pub use identity::ClientId;
