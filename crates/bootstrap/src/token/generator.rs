//! Session token generation.
//!
//! # Format
//!
//! ```text
//! {prefix}{pid}-{unix_seconds + attempt}
//! {prefix}{pid}-{unix_seconds + attempt}-{call}
//! ```
//!
//! The salt is the wall-clock second read once per call plus the attempt
//! index, so every attempt of one call gets a distinct token even if the
//! clock does not move between attempts.
//!
//! Each call to [`SessionTokenGenerator::attempts`] also takes the next
//! number from a call sequence. Generators built with
//! [`SessionTokenGenerator::new`] share one sequence per process, so two
//! calls in the same second still get different tokens. The first call of
//! a sequence uses the short form.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::TransportError;
use crate::token::clock::{Clock, SystemClock};
use crate::token::session::SessionToken;

static PROCESS_CALLS: AtomicU32 = AtomicU32::new(0);

/// Where call numbers come from.
#[derive(Clone)]
enum CallSequence {
    Process,
    Own(Arc<AtomicU32>),
}

impl CallSequence {
    fn next(&self) -> u32 {
        match self {
            CallSequence::Process => PROCESS_CALLS.fetch_add(1, Ordering::Relaxed),
            CallSequence::Own(calls) => calls.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// Produces session tokens from a process id and a time-based salt.
#[derive(Clone)]
pub struct SessionTokenGenerator {
    prefix: String,
    pid: u32,
    clock: Arc<dyn Clock>,
    calls: CallSequence,
}

impl SessionTokenGenerator {
    /// Generator for the current process using the system clock and the
    /// process-wide call sequence.
    pub fn new(prefix: impl Into<String>) -> Result<Self, TransportError> {
        let mut generator = Self::with_clock(prefix, std::process::id(), SystemClock)?;
        generator.calls = CallSequence::Process;
        Ok(generator)
    }

    /// Generator with an explicit process id and clock.
    ///
    /// It numbers calls on its own, starting at zero; clones share that
    /// sequence.
    pub fn with_clock(
        prefix: impl Into<String>,
        pid: u32,
        clock: impl Clock + 'static,
    ) -> Result<Self, TransportError> {
        let prefix = prefix.into();
        SessionToken::check_component(&prefix)?;
        Ok(Self {
            prefix,
            pid,
            clock: Arc::new(clock),
            calls: CallSequence::Own(Arc::new(AtomicU32::new(0))),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Tokens for consecutive attempts of one call, salted from the current time.
    pub fn attempts(&self) -> TokenAttempts {
        TokenAttempts {
            prefix: self.prefix.clone(),
            pid: self.pid,
            base: self.clock.unix_seconds(),
            attempt: 0,
            call: self.calls.next(),
        }
    }
}

impl fmt::Debug for SessionTokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenGenerator")
            .field("prefix", &self.prefix)
            .field("pid", &self.pid)
            .finish()
    }
}

/// Unbounded sequence of per-attempt tokens. Callers bound it with `take`.
#[derive(Clone, Debug)]
pub struct TokenAttempts {
    prefix: String,
    pid: u32,
    base: u64,
    attempt: u32,
    call: u32,
}

impl Iterator for TokenAttempts {
    type Item = SessionToken;

    fn next(&mut self) -> Option<SessionToken> {
        let salt = self.base.wrapping_add(u64::from(self.attempt));
        self.attempt = self.attempt.wrapping_add(1);
        let token = match self.call {
            0 => format!("{}{}-{}", self.prefix, self.pid, salt),
            call => format!("{}{}-{}-{}", self.prefix, self.pid, salt, call),
        };
        Some(SessionToken::from_validated(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::clock::FixedClock;

    #[test]
    fn test_token_format() {
        let generator = SessionTokenGenerator::with_clock("session", 4242, FixedClock(1000)).unwrap();
        let first = generator.attempts().next().unwrap();
        assert_eq!(first.as_str(), "session4242-1000");
    }

    #[test]
    fn test_attempts_are_distinct() {
        let generator = SessionTokenGenerator::with_clock("s", 1, FixedClock(500)).unwrap();
        let tokens: Vec<String> = generator
            .attempts()
            .take(5)
            .map(|t| t.as_str().to_owned())
            .collect();
        assert_eq!(tokens, ["s1-500", "s1-501", "s1-502", "s1-503", "s1-504"]);
    }

    #[test]
    fn test_calls_in_the_same_second_differ() {
        let generator = SessionTokenGenerator::with_clock("s", 1, FixedClock(500)).unwrap();
        let first: Vec<String> = generator.attempts().take(2).map(|t| t.to_string()).collect();
        let second: Vec<String> = generator.clone().attempts().take(2).map(|t| t.to_string()).collect();

        assert_eq!(first, ["s1-500", "s1-501"]);
        assert_eq!(second, ["s1-500-1", "s1-501-1"]);
    }

    #[test]
    fn test_process_generators_share_call_sequence() {
        let a = SessionTokenGenerator::new("session").unwrap();
        let b = SessionTokenGenerator::new("session").unwrap();
        let first = a.attempts().next().unwrap();
        let second = b.attempts().next().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        assert!(SessionTokenGenerator::with_clock("a/b", 1, FixedClock(0)).is_err());
    }

    #[test]
    fn test_system_generator_uses_own_pid() {
        let generator = SessionTokenGenerator::new("session").unwrap();
        assert_eq!(generator.pid(), std::process::id());
        let token = generator.attempts().next().unwrap();
        assert!(token
            .as_str()
            .starts_with(&format!("session{}-", std::process::id())));
    }
}
