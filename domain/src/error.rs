//! Error types for the `domain` layer.
use integration_auth::error::{
    CredentialErrorKind, Error as IntegrationAuthError, ErrorKind as IntegrationAuthErrorKind,
    HttpErrorKind, OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field holds either the original error or, for
/// errors raised here, the human-readable message shown to the caller.
/// `web` maps the `error_kind`s to HTTP status codes.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// Malformed input or credentials.
    Validation,
    /// OAuth state mismatch or expiry, or a rejected access token.
    Authentication,
    /// No stored credential for the user and organization.
    NotFound,
    /// The provider failed or answered with a non-success status.
    Upstream(UpstreamErrorKind),
    /// Anything else.
    Internal(InternalErrorKind),
}

/// Enum representing the ways a call to the provider can fail.
#[derive(Debug, PartialEq)]
pub enum UpstreamErrorKind {
    Status { status: u16, body: String },
    Timeout,
    Network,
    InvalidResponse,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Store,
    Other(String),
}

impl Error {
    /// Human-readable description of the error for the caller.
    pub fn message(&self) -> String {
        match &self.source {
            Some(source) => source.to_string(),
            None => match &self.error_kind {
                DomainErrorKind::Validation => "Invalid request".to_string(),
                DomainErrorKind::Authentication => "Authentication failed".to_string(),
                DomainErrorKind::NotFound => "Not found".to_string(),
                DomainErrorKind::Upstream(_) => "Upstream provider error".to_string(),
                DomainErrorKind::Internal(_) => "Internal error".to_string(),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

pub(crate) const STATE_MISMATCH_MESSAGE: &str = "State does not match or has expired.";
pub(crate) const MALFORMED_CREDENTIALS_MESSAGE: &str = "Malformed credentials format.";
pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials provided.";

/// Helper function to create domain errors carrying a caller-facing message.
pub(crate) fn domain_error(error_kind: DomainErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind,
    }
}

// This is where we translate errors from the `integration-auth` layer to the `domain` layer.
impl From<IntegrationAuthError> for Error {
    fn from(err: IntegrationAuthError) -> Self {
        let error_kind = match &err.error_kind {
            IntegrationAuthErrorKind::OAuth(OAuthErrorKind::InvalidState) => {
                return domain_error(DomainErrorKind::Authentication, STATE_MISMATCH_MESSAGE);
            }
            IntegrationAuthErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed {
                status,
                body,
            }) => {
                return domain_error(
                    DomainErrorKind::Upstream(UpstreamErrorKind::Status {
                        status: *status,
                        body: body.clone(),
                    }),
                    &format!("Failed to retrieve access token: {body}"),
                );
            }
            IntegrationAuthErrorKind::Credential(CredentialErrorKind::Malformed) => {
                return domain_error(DomainErrorKind::Validation, MALFORMED_CREDENTIALS_MESSAGE);
            }
            IntegrationAuthErrorKind::Credential(CredentialErrorKind::MissingAccessToken) => {
                return domain_error(DomainErrorKind::Validation, INVALID_CREDENTIALS_MESSAGE);
            }
            IntegrationAuthErrorKind::OAuth(OAuthErrorKind::InvalidResponse) => {
                DomainErrorKind::Upstream(UpstreamErrorKind::InvalidResponse)
            }
            IntegrationAuthErrorKind::Store(_) => DomainErrorKind::Internal(InternalErrorKind::Store),
            IntegrationAuthErrorKind::Http(HttpErrorKind::Timeout) => {
                DomainErrorKind::Upstream(UpstreamErrorKind::Timeout)
            }
            IntegrationAuthErrorKind::Http(HttpErrorKind::BuilderFailed) => {
                DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build HTTP client".to_string(),
                ))
            }
            IntegrationAuthErrorKind::Http(_) => {
                DomainErrorKind::Upstream(UpstreamErrorKind::Network)
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        let error_kind = if err.is_builder() {
            DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to build reqwest client".to_string(),
            ))
        } else if err.is_timeout() {
            DomainErrorKind::Upstream(UpstreamErrorKind::Timeout)
        } else if err.is_decode() {
            DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to decode provider response".to_string(),
            ))
        // Errors that result from issues with the network call itself.
        } else {
            DomainErrorKind::Upstream(UpstreamErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integration_auth::error::{credential_error, oauth_error, store_error, StoreErrorKind};

    #[test]
    fn test_message_uses_source() {
        let err = domain_error(DomainErrorKind::NotFound, "Please connect first.");
        assert_eq!(err.message(), "Please connect first.");
    }

    #[test]
    fn test_message_falls_back_to_kind() {
        let err = Error {
            source: None,
            error_kind: DomainErrorKind::Validation,
        };
        assert_eq!(err.message(), "Invalid request");
    }

    #[test]
    fn test_invalid_state_is_authentication() {
        let err: Error = oauth_error(OAuthErrorKind::InvalidState, "bad").into();
        assert_eq!(err.error_kind, DomainErrorKind::Authentication);
        assert_eq!(err.message(), "State does not match or has expired.");
    }

    #[test]
    fn test_credential_errors_are_validation() {
        let err: Error =
            credential_error(CredentialErrorKind::Malformed, "not json").into();
        assert_eq!(err.error_kind, DomainErrorKind::Validation);
        assert_eq!(err.message(), "Malformed credentials format.");

        let err: Error =
            credential_error(CredentialErrorKind::MissingAccessToken, "no token").into();
        assert_eq!(err.error_kind, DomainErrorKind::Validation);
        assert_eq!(err.message(), "Invalid credentials provided.");
    }

    #[test]
    fn test_token_exchange_failure_keeps_status_and_body() {
        let err: Error = oauth_error(
            OAuthErrorKind::TokenExchangeFailed {
                status: 400,
                body: "BAD_AUTH_CODE".to_string(),
            },
            "failed",
        )
        .into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Upstream(UpstreamErrorKind::Status {
                status: 400,
                body: "BAD_AUTH_CODE".to_string(),
            })
        );
        assert_eq!(
            err.message(),
            "Failed to retrieve access token: BAD_AUTH_CODE"
        );
    }

    #[test]
    fn test_store_failure_is_internal() {
        let err: Error = store_error(StoreErrorKind::InvalidExpiry, "Expiry is out of range").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Store)
        );
    }
}
