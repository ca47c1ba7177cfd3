//! Host-based authentication hooks.
//!
//! A hook decides whether a connecting host may use a listener without
//! any other authentication. Hooks are attached per listener entry; the
//! connection-accept path asks the entry through [`ListenerEntry::authorize_host`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::registry::ListenerEntry;
use crate::transport::TransportHandle;

/// Verdict of a host-based authentication hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthDecision {
    Allow,
    Deny,
}

impl AuthDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, AuthDecision::Allow)
    }
}

impl From<bool> for AuthDecision {
    fn from(allow: bool) -> Self {
        if allow {
            AuthDecision::Allow
        } else {
            AuthDecision::Deny
        }
    }
}

/// Address of a connecting peer, in `transport/address` form.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HostDescriptor {
    transport: String,
    address: String,
}

impl HostDescriptor {
    pub fn new(transport: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            transport: transport.into(),
            address: address.into(),
        }
    }

    /// Parse `tcp/10.0.0.7` style descriptors. Without a `/` the whole
    /// string is taken as the address.
    pub fn parse(descriptor: &str) -> Self {
        match descriptor.split_once('/') {
            Some((transport, address)) => Self::new(transport, address),
            None => Self::new("", descriptor),
        }
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.transport.is_empty() {
            f.write_str(&self.address)
        } else {
            write!(f, "{}/{}", self.transport, self.address)
        }
    }
}

/// Decides whether a host may connect without further authentication.
pub trait HostBasedAuth: Send + Sync {
    fn decide(&self, host: &HostDescriptor) -> AuthDecision;
}

impl<F> HostBasedAuth for F
where
    F: Fn(&HostDescriptor) -> AuthDecision + Send + Sync,
{
    fn decide(&self, host: &HostDescriptor) -> AuthDecision {
        self(host)
    }
}

/// Shared handle to a hook. Attaching it never extends an entry's lifetime.
pub type AuthHook = Arc<dyn HostBasedAuth>;

impl<H: TransportHandle> ListenerEntry<H> {
    /// Attach `hook` to this entry only, or clear it with `None`.
    pub fn set_host_based_auth_hook(&mut self, hook: Option<AuthHook>) {
        debug!(
            network_id = %self.network_id,
            attached = hook.is_some(),
            "host-based auth hook updated"
        );
        self.auth_hook = hook;
    }

    pub fn auth_hook(&self) -> Option<&AuthHook> {
        self.auth_hook.as_ref()
    }

    /// Ask the attached hook about `host`. Without a hook, hosts are denied.
    pub fn authorize_host(&self, host: &HostDescriptor) -> AuthDecision {
        match &self.auth_hook {
            Some(hook) => hook.decide(host),
            None => AuthDecision::Deny,
        }
    }
}
