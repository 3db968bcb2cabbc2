//! Error types for the `integration-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for integration-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in integration-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Store(StoreErrorKind),
    Credential(CredentialErrorKind),
    Http(HttpErrorKind),
}

/// Errors from OAuth operations.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The state parameter could not be decoded or its signature did not verify.
    InvalidState,
    /// The token endpoint answered with a non-success status.
    TokenExchangeFailed { status: u16, body: String },
    /// The token endpoint answered with success but the body was unusable.
    InvalidResponse,
}

/// Errors from key-value store operations.
#[derive(Debug, PartialEq)]
pub enum StoreErrorKind {
    /// The requested expiry cannot be represented.
    InvalidExpiry,
}

/// Errors from parsing a stored credential blob.
#[derive(Debug, PartialEq)]
pub enum CredentialErrorKind {
    /// Not JSON, or not a JSON object.
    Malformed,
    /// JSON object without a usable `access_token`.
    MissingAccessToken,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Timeout,
    Network,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind),
            ErrorKind::Store(kind) => write!(f, "Store error: {:?}", kind),
            ErrorKind::Credential(kind) => write!(f, "Credential error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_timeout() {
            ErrorKind::Http(HttpErrorKind::Timeout)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create store errors.
pub fn store_error(kind: StoreErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Store(kind),
    }
}

/// Helper function to create credential errors.
pub fn credential_error(kind: CredentialErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Credential(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = oauth_error(OAuthErrorKind::InvalidState, "bad state");
        assert_eq!(err.to_string(), "OAuth error: InvalidState");
    }

    #[test]
    fn test_helper_keeps_message_as_source() {
        let err = credential_error(CredentialErrorKind::Malformed, "not json");
        assert_eq!(
            err.error_kind,
            ErrorKind::Credential(CredentialErrorKind::Malformed)
        );
        assert_eq!(err.source().unwrap().to_string(), "not json");
    }
}
