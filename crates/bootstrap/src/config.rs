//! Listener configuration.
//!
//! Only the programmatic surface lives here; reading the values from a file
//! or the environment is up to the embedding application.

use serde::{Deserialize, Serialize};

use crate::error::{ListenError, Result};
use crate::token::SessionToken;
use crate::transport::TransportSet;

/// Default number of bind attempts per call.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default prefix of generated session tokens.
pub const DEFAULT_TOKEN_PREFIX: &str = "session";

/// Options recognized by the listener registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Maximum number of bind attempts, each under a fresh token.
    pub max_retries: u32,
    /// Transport kinds to bind.
    pub transport_set: TransportSet,
    /// Fixed prefix of generated tokens.
    pub token_prefix: String,
}

impl ListenerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_transport_set(mut self, transport_set: TransportSet) -> Self {
        self.transport_set = transport_set;
        self
    }

    pub fn with_token_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.token_prefix = prefix.into();
        self
    }

    /// Reject configurations that could never produce a listener.
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(ListenError::InvalidConfig(
                "max_retries must be at least 1".into(),
            ));
        }
        if self.transport_set.is_empty() {
            return Err(ListenError::InvalidConfig(
                "transport_set selects no transports".into(),
            ));
        }
        SessionToken::check_component(&self.token_prefix)
            .map_err(|err| ListenError::InvalidConfig(err.to_string()))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            transport_set: TransportSet::All,
            token_prefix: DEFAULT_TOKEN_PREFIX.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportKind;

    #[test]
    fn test_defaults() {
        let config = ListenerConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.transport_set, TransportSet::All);
        assert_eq!(config.token_prefix, "session");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let config = ListenerConfig::new().with_max_retries(0);
        assert!(matches!(config.validate(), Err(ListenError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_transport_set_rejected() {
        let config = ListenerConfig::new().with_transport_set(TransportSet::Only(vec![]));
        assert!(matches!(config.validate(), Err(ListenError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_prefix_rejected() {
        let config = ListenerConfig::new().with_token_prefix("../evil");
        assert!(matches!(config.validate(), Err(ListenError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ListenerConfig::new()
            .with_max_retries(2)
            .with_transport_set(TransportSet::Only(vec![TransportKind::Local]))
            .with_token_prefix("dcop");
        assert_eq!(config.max_retries, 2);
        assert!(config.transport_set.contains(TransportKind::Local));
        assert!(!config.transport_set.contains(TransportKind::Tcp));
        assert_eq!(config.token_prefix, "dcop");
    }
}
