//! Session token module.
//!
//! Tokens name the endpoints of one bind attempt. They only need to be
//! unique enough that two attempts rarely collide; collisions are resolved
//! by retrying with the next token.

pub mod clock;
pub mod generator;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::{SessionTokenGenerator, TokenAttempts};
pub use session::SessionToken;
