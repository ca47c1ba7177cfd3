//! Registry state machine.

use std::fmt;

/// State of a registry within one `create_listeners` call.
///
/// ```text
/// Unstarted -> Attempting -> Bound
///                  |  ^
///                  +--+ (zero usable, retries left)
///                  |
///                  +-> Failed
/// ```
///
/// `Bound` and `Failed` are terminal until the registry is torn down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegistryState {
    #[default]
    Unstarted,
    Attempting,
    Bound,
    Failed,
}

impl RegistryState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RegistryState::Bound | RegistryState::Failed)
    }
}

impl fmt::Display for RegistryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistryState::Unstarted => "unstarted",
            RegistryState::Attempting => "attempting",
            RegistryState::Bound => "bound",
            RegistryState::Failed => "failed",
        };
        f.write_str(name)
    }
}
