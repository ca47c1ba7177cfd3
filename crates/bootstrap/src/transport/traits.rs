//! Core transport trait definitions.

use crate::error::{TransportBindError, TransportError};
use crate::token::SessionToken;
use crate::transport::kind::{TransportKind, TransportSet};

/// A bound listening endpoint.
///
/// Handles are exclusively owned by the listener entry that adopted them.
/// Implementations must make `close` safe to call on an already closed
/// handle, but the registry never does so.
pub trait TransportHandle {
    /// Kind of transport this handle is bound on.
    fn kind(&self) -> TransportKind;

    /// OS-level connection number (file descriptor) while open.
    fn connection_number(&self) -> Option<i32>;

    /// Opaque id a peer uses to address this listener, e.g. `tcp/host:7000`.
    ///
    /// `None` or an empty string means the id cannot be obtained and the
    /// handle is unusable.
    fn network_id(&self) -> Option<String>;

    /// True if the listener is reachable only from the same host.
    fn is_local(&self) -> bool {
        self.kind().is_local()
    }

    /// Release the OS resources held by this handle.
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Outcome of one `bind_all` call.
#[derive(Debug)]
pub struct BindReport<H> {
    /// Bound handles, in bind order.
    pub handles: Vec<H>,
    /// True if at least one requested kind failed to bind.
    pub partial: bool,
    /// Per-kind failures, absorbed unless nothing bound.
    pub failures: Vec<TransportBindError>,
}

impl<H> BindReport<H> {
    pub fn new(handles: Vec<H>, failures: Vec<TransportBindError>) -> Self {
        let partial = !failures.is_empty();
        Self {
            handles,
            partial,
            failures,
        }
    }

    /// A report with nothing bound and nothing failed.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H> Default for BindReport<H> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Binds one listener per available transport kind under a session token.
pub trait TransportEnumerator {
    /// Handle type produced by this enumerator.
    type Handle: TransportHandle;

    /// Bind every kind in `transports` whose endpoint can be named by `token`.
    ///
    /// Per-kind failures go into the report; `Err` means the enumerator
    /// could not run at all. The registry treats both the same way when
    /// nothing bound.
    fn bind_all(
        &mut self,
        token: &SessionToken,
        transports: &TransportSet,
    ) -> Result<BindReport<Self::Handle>, TransportError>;
}
