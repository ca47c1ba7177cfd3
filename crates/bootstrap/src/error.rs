//! Error types for the bootstrap library.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::registry::RegistryState;
use crate::transport::TransportKind;

/// Result type alias for listener creation.
pub type Result<T> = std::result::Result<T, ListenError>;

/// Failures reported by a transport or one of its handles.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The token cannot be used to name an endpoint.
    #[error("invalid session token {token:?}: {reason}")]
    InvalidToken { token: String, reason: &'static str },
    /// The transport layer as a whole could not be queried.
    #[error("transport layer unavailable: {0}")]
    Unavailable(String),
    /// An OS call on a single transport failed.
    #[error("{kind} transport i/o error: {source}")]
    Io {
        kind: TransportKind,
        #[source]
        source: io::Error,
    },
}

/// One transport kind failed to bind within an attempt.
///
/// Absorbed by the registry as long as another kind bound in the same attempt.
#[derive(Debug, Error)]
#[error("failed to bind {kind} transport: {reason}")]
pub struct TransportBindError {
    pub kind: TransportKind,
    pub reason: String,
}

impl TransportBindError {
    pub fn new(kind: TransportKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Call-level failures of the listener registry.
#[derive(Debug, Error)]
pub enum ListenError {
    /// Every attempt ended with zero usable listeners.
    #[error("no listening endpoints available after {attempts} attempt(s)")]
    ExhaustedRetries { attempts: u32 },
    /// The listener table could not grow; everything bound in the attempt was closed.
    #[error("cannot allocate listener table for {requested} entries")]
    ResourceAllocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    /// The caller's deadline passed between attempts.
    #[error("deadline expired after {attempts} attempt(s) with no listening endpoints")]
    DeadlineExceeded { attempts: u32 },
    #[error("invalid listener configuration: {0}")]
    InvalidConfig(String),
    /// `create_listeners` was called again without a teardown in between.
    #[error("listener registry is {state}; tear it down before listening again")]
    RegistryInUse { state: RegistryState },
}

/// Non-fatal failure while closing one listener during teardown.
#[derive(Debug, Error)]
#[error("failed to close listener {network_id}: {source}")]
pub struct TeardownWarning {
    pub network_id: String,
    #[source]
    pub source: TransportError,
}
