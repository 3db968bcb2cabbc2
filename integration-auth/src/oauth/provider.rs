//! OAuth provider types.

/// Authorization request with URL and state management data.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// CSRF state parameter for validation.
    pub state: String,
}

/// Endpoint configuration for an OAuth provider.
#[derive(Debug, Clone)]
pub struct ProviderUrls {
    /// User-facing consent page.
    pub authorize_url: String,
    /// Server-to-server code exchange endpoint.
    pub token_url: String,
}
