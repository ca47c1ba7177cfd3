//! Listener registry.
//!
//! The registry runs bounded bind attempts against a transport enumerator
//! and keeps the resulting listener table. Entries own their transport
//! handles, so dropping the registry or the table closes every listener.

pub mod entry;
pub mod registry;
pub mod state;
pub mod table;

pub use entry::ListenerEntry;
pub use registry::ListenerRegistry;
pub use state::RegistryState;
pub use table::ListenerTable;
