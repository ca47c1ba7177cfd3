//! Listener entries.

use std::fmt;

use tracing::warn;

use crate::auth::AuthHook;
use crate::error::TransportError;
use crate::transport::{TransportHandle, TransportKind};

/// One bound listening endpoint and its optional host-based auth hook.
///
/// # Invariants
///
/// - `network_id` is non-empty iff the entry still holds an open handle
/// - The handle is owned by this entry alone and is closed at most once
/// - Dropping an open entry closes its handle
pub struct ListenerEntry<H: TransportHandle> {
    pub(crate) handle: Option<H>,
    pub(crate) network_id: String,
    pub(crate) auth_hook: Option<AuthHook>,
}

impl<H: TransportHandle> ListenerEntry<H> {
    /// Wrap a freshly bound handle.
    ///
    /// Hands the handle back if it has no usable network id; the caller is
    /// then responsible for closing it.
    pub fn from_bound(handle: H) -> Result<Self, H> {
        match handle.network_id() {
            Some(network_id) if !network_id.is_empty() => Ok(Self {
                handle: Some(handle),
                network_id,
                auth_hook: None,
            }),
            _ => Err(handle),
        }
    }

    /// Network id, or `""` once closed.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// True if the listener is open and reachable only from this host.
    pub fn is_local(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| handle.is_local())
    }

    pub fn kind(&self) -> Option<TransportKind> {
        self.handle.as_ref().map(|handle| handle.kind())
    }

    pub fn connection_number(&self) -> Option<i32> {
        self.handle.as_ref().and_then(|handle| handle.connection_number())
    }

    /// The owned transport handle, for the connection-accept path.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Close the handle and forget the network id.
    ///
    /// Returns `Ok(false)` without touching the OS if already closed. A
    /// failed close still leaves the entry closed.
    pub fn close(&mut self) -> Result<bool, TransportError> {
        let Some(mut handle) = self.handle.take() else {
            return Ok(false);
        };
        self.network_id.clear();
        handle.close().map(|()| true)
    }
}

impl<H: TransportHandle> Drop for ListenerEntry<H> {
    fn drop(&mut self) {
        let network_id = std::mem::take(&mut self.network_id);
        if let Err(error) = self.close() {
            warn!(%network_id, %error, "failed to close dropped listener");
        }
    }
}

impl<H: TransportHandle> fmt::Debug for ListenerEntry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("network_id", &self.network_id)
            .field("kind", &self.kind())
            .field("open", &self.is_open())
            .field("auth_hook", &self.auth_hook.is_some())
            .finish()
    }
}
