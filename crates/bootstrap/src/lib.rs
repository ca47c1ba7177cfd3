//! Listener bootstrap and endpoint registry for inter-process session protocols.
//!
//! This crate provides the transport-agnostic core of listener setup:
//! - Session token generation
//! - Transport handle and enumerator abstractions
//! - The listener table and the retrying registry that fills it
//! - Locality-ordered network id composition
//! - Host-based authentication hooks per listener
//! - Teardown of bound listeners

pub mod auth;
pub mod compose;
pub mod config;
pub mod error;
pub mod registry;
pub mod teardown;
pub mod token;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthDecision, AuthHook, HostBasedAuth, HostDescriptor};
pub use compose::{compose_network_ids, split_network_ids};
pub use config::ListenerConfig;
pub use error::{ListenError, Result, TeardownWarning, TransportBindError, TransportError};
pub use registry::{ListenerEntry, ListenerRegistry, ListenerTable, RegistryState};
pub use teardown::{close_all, TeardownReport};
pub use token::{SessionToken, SessionTokenGenerator};
pub use transport::{BindReport, TransportEnumerator, TransportHandle, TransportKind, TransportSet};
