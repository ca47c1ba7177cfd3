//! Socket-level configuration.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use bootstrap::{ListenError, Result};
use serde::{Deserialize, Serialize};

/// Name of the directory holding local sockets, under the temp dir.
pub const DEFAULT_SOCKET_DIR_NAME: &str = ".session-unix";

/// Where and how the system transports bind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// Directory in which local sockets are created, one per token.
    pub socket_dir: PathBuf,
    /// Address the TCP listener binds to, always on an ephemeral port.
    pub tcp_host: IpAddr,
    /// Host name advertised in network ids; the system host name if unset.
    pub hostname: Option<String>,
}

impl SocketConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_socket_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.socket_dir = dir.into();
        self
    }

    pub fn with_tcp_host(mut self, host: IpAddr) -> Self {
        self.tcp_host = host;
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Reject values that would produce ids a peer cannot split or parse.
    pub fn validate(&self) -> Result<()> {
        let Some(dir) = self.socket_dir.to_str() else {
            return Err(ListenError::InvalidConfig(format!(
                "socket_dir {} is not valid UTF-8",
                self.socket_dir.display()
            )));
        };
        if dir.is_empty() {
            return Err(ListenError::InvalidConfig("socket_dir is empty".into()));
        }
        if dir.contains(',') {
            return Err(ListenError::InvalidConfig(format!(
                "socket_dir {dir:?} contains ','"
            )));
        }
        if let Some(hostname) = &self.hostname {
            if !is_usable_hostname(hostname) {
                return Err(ListenError::InvalidConfig(format!(
                    "hostname {hostname:?} is not usable in a network id"
                )));
            }
        }
        Ok(())
    }
}

/// Whether `hostname` can sit between the `/` and `:` of a network id.
pub(crate) fn is_usable_hostname(hostname: &str) -> bool {
    !hostname.is_empty() && !hostname.contains([',', '/', ':'])
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            socket_dir: std::env::temp_dir().join(DEFAULT_SOCKET_DIR_NAME),
            tcp_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            hostname: None,
        }
    }
}
