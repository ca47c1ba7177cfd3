//! Handle type produced by [`SystemTransports`](crate::SystemTransports).

use bootstrap::{TransportError, TransportHandle, TransportKind};

use crate::tcp::TcpTransport;
#[cfg(unix)]
use crate::unix::UnixTransport;

/// A bound system listener of any supported kind.
#[derive(Debug)]
pub enum SystemHandle {
    #[cfg(unix)]
    Local(UnixTransport),
    Tcp(TcpTransport),
}

impl SystemHandle {
    #[cfg(unix)]
    pub fn as_local(&self) -> Option<&UnixTransport> {
        match self {
            SystemHandle::Local(transport) => Some(transport),
            _ => None,
        }
    }

    pub fn as_tcp(&self) -> Option<&TcpTransport> {
        match self {
            SystemHandle::Tcp(transport) => Some(transport),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn inner(&self) -> &dyn TransportHandle {
        match self {
            #[cfg(unix)]
            SystemHandle::Local(transport) => transport,
            SystemHandle::Tcp(transport) => transport,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TransportHandle {
        match self {
            #[cfg(unix)]
            SystemHandle::Local(transport) => transport,
            SystemHandle::Tcp(transport) => transport,
        }
    }
}

impl TransportHandle for SystemHandle {
    fn kind(&self) -> TransportKind {
        self.inner().kind()
    }

    fn connection_number(&self) -> Option<i32> {
        self.inner().connection_number()
    }

    fn network_id(&self) -> Option<String> {
        self.inner().network_id()
    }

    fn is_local(&self) -> bool {
        self.inner().is_local()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.inner_mut().close()
    }
}
