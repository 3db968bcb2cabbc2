use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError, UpstreamErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

/// Errors raised by the web layer itself, before reaching the domain.
#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    /// Bad request input, with the detail shown to the caller.
    Input(String),
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Web(WebErrorKind::Input(_)) => StatusCode::BAD_REQUEST,
            Error::Domain(domain_error) => match &domain_error.error_kind {
                DomainErrorKind::Validation => StatusCode::BAD_REQUEST,
                DomainErrorKind::Authentication => StatusCode::UNAUTHORIZED,
                DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
                DomainErrorKind::Upstream(upstream_error_kind) => match upstream_error_kind {
                    // Pass the provider's own error status through.
                    UpstreamErrorKind::Status { status, .. } => StatusCode::from_u16(*status)
                        .ok()
                        .filter(|code| code.is_client_error() || code.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY),
                    UpstreamErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    UpstreamErrorKind::Network | UpstreamErrorKind::InvalidResponse => {
                        StatusCode::BAD_GATEWAY
                    }
                },
                DomainErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn detail(&self) -> String {
        match self {
            Error::Web(WebErrorKind::Input(detail)) => detail.clone(),
            // Internal details stay in the logs.
            Error::Domain(domain_error)
                if matches!(domain_error.error_kind, DomainErrorKind::Internal(_)) =>
            {
                "An unexpected error occurred.".to_string()
            }
            Error::Domain(domain_error) => domain_error.message(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {:?}", status, self);
        } else {
            warn!("Request failed with {}: {:?}", status, self);
        }

        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_error(error_kind: DomainErrorKind, message: &str) -> Error {
        Error::Domain(DomainError {
            source: Some(message.to_string().into()),
            error_kind,
        })
    }

    #[test]
    fn test_status_codes_follow_error_kind() {
        let cases = [
            (DomainErrorKind::Validation, StatusCode::BAD_REQUEST),
            (DomainErrorKind::Authentication, StatusCode::UNAUTHORIZED),
            (DomainErrorKind::NotFound, StatusCode::NOT_FOUND),
            (
                DomainErrorKind::Upstream(UpstreamErrorKind::Network),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DomainErrorKind::Upstream(UpstreamErrorKind::Timeout),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                DomainErrorKind::Internal(domain::error::InternalErrorKind::Store),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (kind, expected) in cases {
            assert_eq!(domain_error(kind, "x").status_code(), expected);
        }
    }

    #[test]
    fn test_upstream_status_is_passed_through() {
        let err = domain_error(
            DomainErrorKind::Upstream(UpstreamErrorKind::Status {
                status: 429,
                body: "slow down".to_string(),
            }),
            "Error fetching HubSpot data: slow down",
        );
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.detail(), "Error fetching HubSpot data: slow down");
    }

    #[test]
    fn test_non_error_upstream_status_becomes_bad_gateway() {
        let err = domain_error(
            DomainErrorKind::Upstream(UpstreamErrorKind::Status {
                status: 302,
                body: String::new(),
            }),
            "redirected",
        );
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let err = domain_error(
            DomainErrorKind::Internal(domain::error::InternalErrorKind::Config),
            "HubSpot client secret is not configured",
        );
        assert_eq!(err.detail(), "An unexpected error occurred.");
    }
}
