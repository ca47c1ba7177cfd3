//! Transport abstractions.
//!
//! A transport enumerator binds one listening endpoint per transport kind
//! under a session token. The resulting handles are owned by listener
//! entries and are only ever closed through them.

pub mod kind;
pub mod traits;

pub use kind::{TransportKind, TransportSet};
pub use traits::{BindReport, TransportEnumerator, TransportHandle};
