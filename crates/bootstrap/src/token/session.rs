//! Session token value type.

use std::fmt;

use crate::error::TransportError;

/// Name under which one bind attempt creates its endpoints.
///
/// A token is always usable as a single path component: it is non-empty and
/// contains no `/`, `,` or NUL.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SessionToken(String);

impl SessionToken {
    /// Validate and wrap a caller-chosen token (for well-known listeners).
    pub fn new(value: impl Into<String>) -> Result<Self, TransportError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TransportError::InvalidToken {
                token: value,
                reason: "token is empty",
            });
        }
        Self::check_component(&value)?;
        Ok(Self(value))
    }

    /// Check that `part` may appear inside a token.
    ///
    /// Empty parts are allowed, so this also validates token prefixes.
    pub fn check_component(part: &str) -> Result<(), TransportError> {
        let reason = if part.contains('/') {
            "token contains '/'"
        } else if part.contains(',') {
            "token contains ','"
        } else if part.contains('\0') {
            "token contains NUL"
        } else if part == "." || part == ".." {
            "token is a relative path"
        } else {
            return Ok(());
        };
        Err(TransportError::InvalidToken {
            token: part.to_owned(),
            reason,
        })
    }

    /// Built from parts the generator already validated.
    pub(crate) fn from_validated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token() {
        let token = SessionToken::new("session42-1700000000").unwrap();
        assert_eq!(token.as_str(), "session42-1700000000");
        assert_eq!(token.to_string(), "session42-1700000000");
    }

    #[test]
    fn test_rejects_bad_tokens() {
        for bad in ["", "a/b", "a,b", "nul\0", ".", ".."] {
            assert!(SessionToken::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_empty_component_is_allowed() {
        assert!(SessionToken::check_component("").is_ok());
    }
}
