//! OS-backed transports for the listener registry.
//!
//! This crate binds real listening sockets:
//! - `local`: a Unix-domain stream socket named after the session token
//! - `tcp`: a TCP socket on an ephemeral port
//!
//! and exposes them to [`bootstrap::ListenerRegistry`] through
//! [`SystemTransports`].

pub mod config;
pub mod enumerator;
pub mod handle;
pub mod tcp;
#[cfg(unix)]
pub mod unix;

pub use config::SocketConfig;
pub use enumerator::SystemTransports;
pub use handle::SystemHandle;
pub use tcp::TcpTransport;
#[cfg(unix)]
pub use unix::UnixTransport;

/// A registry over the system transports.
pub type SystemRegistry = bootstrap::ListenerRegistry<SystemTransports>;
