//! TCP listeners on ephemeral ports.

use std::net::{IpAddr, SocketAddr, TcpListener};

use bootstrap::{TransportBindError, TransportError, TransportHandle, TransportKind};
use tracing::debug;

/// A listening TCP socket.
#[derive(Debug)]
pub struct TcpTransport {
    listener: Option<TcpListener>,
    local_addr: SocketAddr,
    network_id: Option<String>,
}

impl TcpTransport {
    /// Bind `host` on a port chosen by the OS.
    pub fn bind(host: IpAddr, hostname: Option<&str>) -> Result<Self, TransportBindError> {
        let listener = TcpListener::bind(SocketAddr::new(host, 0))
            .map_err(|err| TransportBindError::new(TransportKind::Tcp, format!("{host}: {err}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| TransportBindError::new(TransportKind::Tcp, err.to_string()))?;
        let network_id = hostname.map(|host| format!("tcp/{}:{}", host, local_addr.port()));
        debug!(%local_addr, "tcp listener bound");

        Ok(Self {
            listener: Some(listener),
            local_addr,
            network_id,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The underlying listener while open.
    pub fn listener(&self) -> Option<&TcpListener> {
        self.listener.as_ref()
    }
}

impl TransportHandle for TcpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Tcp
    }

    #[cfg(unix)]
    fn connection_number(&self) -> Option<i32> {
        use std::os::unix::io::AsRawFd;

        self.listener.as_ref().map(|listener| listener.as_raw_fd())
    }

    #[cfg(not(unix))]
    fn connection_number(&self) -> Option<i32> {
        None
    }

    fn network_id(&self) -> Option<String> {
        self.listener.as_ref().and(self.network_id.clone())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.listener.take();
        Ok(())
    }
}
