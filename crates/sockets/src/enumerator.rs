//! Binds every selected system transport under a session token.

use std::ffi::OsString;
use std::io;

use bootstrap::{
    BindReport, ListenerConfig, ListenerRegistry, Result, SessionToken,
    TransportBindError, TransportEnumerator, TransportError, TransportKind, TransportSet,
};
use tracing::{debug, warn};

use crate::config::{is_usable_hostname, SocketConfig};
use crate::handle::SystemHandle;
use crate::tcp::TcpTransport;
#[cfg(unix)]
use crate::unix::UnixTransport;

/// Transport enumerator over the host's Unix-domain and TCP sockets.
#[derive(Debug)]
pub struct SystemTransports {
    config: SocketConfig,
    hostname: Option<String>,
}

impl SystemTransports {
    /// Validate `config` and resolve the advertised host name.
    ///
    /// An unresolvable host name is not an error here: listeners still bind
    /// but carry no network id, so the registry drops them.
    pub fn new(config: SocketConfig) -> Result<Self> {
        config.validate()?;
        let hostname = match &config.hostname {
            Some(hostname) => Some(hostname.clone()),
            None => system_hostname(),
        };
        Ok(Self { config, hostname })
    }

    /// A registry binding these transports with `config`.
    pub fn registry(
        config: SocketConfig,
        listener_config: ListenerConfig,
    ) -> Result<ListenerRegistry<Self>> {
        Ok(ListenerRegistry::with_config(Self::new(config)?, listener_config))
    }

    pub fn config(&self) -> &SocketConfig {
        &self.config
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    fn bind_kind(
        &self,
        kind: TransportKind,
        token: &SessionToken,
    ) -> std::result::Result<SystemHandle, TransportBindError> {
        let hostname = self.hostname.as_deref();
        match kind {
            #[cfg(unix)]
            TransportKind::Local => {
                UnixTransport::bind(&self.config.socket_dir, token, hostname).map(SystemHandle::Local)
            }
            #[cfg(not(unix))]
            TransportKind::Local => Err(TransportBindError::new(
                kind,
                "local sockets are not supported on this platform",
            )),
            TransportKind::Tcp => {
                TcpTransport::bind(self.config.tcp_host, hostname).map(SystemHandle::Tcp)
            }
        }
    }
}

impl TransportEnumerator for SystemTransports {
    type Handle = SystemHandle;

    fn bind_all(
        &mut self,
        token: &SessionToken,
        transports: &TransportSet,
    ) -> std::result::Result<BindReport<SystemHandle>, TransportError> {
        let kinds = transports.kinds();
        let mut handles = Vec::with_capacity(kinds.len());
        let mut failures = Vec::new();

        for kind in kinds {
            match self.bind_kind(kind, token) {
                Ok(handle) => handles.push(handle),
                Err(failure) => {
                    debug!(%kind, %token, reason = %failure.reason, "bind failed");
                    failures.push(failure);
                }
            }
        }

        Ok(BindReport::new(handles, failures))
    }
}

fn system_hostname() -> Option<String> {
    advertised_hostname(hostname::get())
}

/// The system host name if it can appear in a network id.
fn advertised_hostname(resolved: io::Result<OsString>) -> Option<String> {
    match resolved {
        Ok(name) => match name.into_string() {
            Ok(name) if is_usable_hostname(&name) => Some(name),
            Ok(name) => {
                warn!(hostname = %name, "host name is not usable in a network id");
                None
            }
            Err(name) => {
                warn!(hostname = ?name, "host name is not valid UTF-8");
                None
            }
        },
        Err(err) => {
            warn!(error = %err, "cannot determine host name");
            None
        }
    }
}
