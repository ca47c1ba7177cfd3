//! Transport kinds and transport selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of transport a listener is bound on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Same-host only (Unix-domain sockets).
    Local,
    /// Reachable over the network.
    Tcp,
}

impl TransportKind {
    /// Every supported kind, in bind order.
    pub const ALL: [TransportKind; 2] = [TransportKind::Local, TransportKind::Tcp];

    /// Name used as the network id prefix (`local/...`, `tcp/...`).
    pub fn name(self) -> &'static str {
        match self {
            TransportKind::Local => "local",
            TransportKind::Tcp => "tcp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True if peers must be on the same host to reach this transport.
    pub fn is_local(self) -> bool {
        matches!(self, TransportKind::Local)
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which transport kinds an enumerator should try to bind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportSet {
    /// All available kinds.
    #[default]
    All,
    /// Only the listed kinds, in the listed order.
    Only(Vec<TransportKind>),
}

impl TransportSet {
    /// Kinds to bind, in order, without duplicates.
    pub fn kinds(&self) -> Vec<TransportKind> {
        match self {
            TransportSet::All => TransportKind::ALL.to_vec(),
            TransportSet::Only(kinds) => {
                let mut unique = Vec::with_capacity(kinds.len());
                for kind in kinds {
                    if !unique.contains(kind) {
                        unique.push(*kind);
                    }
                }
                unique
            }
        }
    }

    pub fn contains(&self, kind: TransportKind) -> bool {
        match self {
            TransportSet::All => true,
            TransportSet::Only(kinds) => kinds.contains(&kind),
        }
    }

    /// True if no kind would be bound at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, TransportSet::Only(kinds) if kinds.is_empty())
    }
}
