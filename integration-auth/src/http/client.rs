//! HTTP client builder with bounded timeouts.

use std::time::Duration;

use crate::error::{Error, ErrorKind, HttpErrorKind};

/// HTTP client configuration.
#[derive(Debug, Clone)]
struct HttpClientConfig {
    /// Request timeout, applied to every outbound call.
    timeout: Duration,
    /// Timeout for establishing a connection.
    connect_timeout: Duration,
    /// User agent string.
    user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("integration-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for HTTP clients used to talk to provider APIs.
///
/// Every client it builds carries a request timeout so a stalled provider
/// surfaces as an error instead of hanging the caller.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    default_headers: reqwest::header::HeaderMap,
}

impl HttpClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
            default_headers: reqwest::header::HeaderMap::new(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    ///
    /// The header value is marked sensitive so it is never printed by `Debug`.
    pub fn with_bearer_token(mut self, token: &str) -> Result<Self, Error> {
        let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
            })?;
        value.set_sensitive(true);
        self.default_headers.insert(reqwest::header::AUTHORIZATION, value);
        Ok(self)
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .user_agent(self.config.user_agent)
            .default_headers(self.default_headers)
            .build()
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.timeout, Duration::from_secs(30));
        assert_eq!(builder.config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder = HttpClientBuilder::new().with_timeout(Duration::from_secs(5));
        assert_eq!(builder.config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_with_bearer_token() {
        let builder = HttpClientBuilder::new().with_bearer_token("abc").unwrap();
        let value = builder
            .default_headers
            .get(reqwest::header::AUTHORIZATION)
            .unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
    }

    #[test]
    fn test_builder_rejects_invalid_token() {
        assert!(HttpClientBuilder::new()
            .with_bearer_token("line\nbreak")
            .is_err());
    }

    #[tokio::test]
    async fn test_build_client() {
        let result = HttpClientBuilder::new().build();
        assert!(result.is_ok());
    }
}
