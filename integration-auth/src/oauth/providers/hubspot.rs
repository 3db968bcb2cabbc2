//! HubSpot OAuth provider implementation.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::credentials::Credential;
use crate::error::{oauth_error, Error, ErrorKind, OAuthErrorKind};
use crate::oauth::{AuthorizationRequest, ProviderUrls};

/// Default HubSpot consent page.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://app.hubspot.com/oauth/authorize";

/// Default HubSpot API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

const TOKEN_PATH: &str = "/oauth/v1/token";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Request to exchange authorization code for tokens
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

impl ProviderUrls {
    /// HubSpot endpoints rooted at the given consent page and API host.
    pub fn hubspot(authorize_url: &str, api_base_url: &str) -> Self {
        Self {
            authorize_url: authorize_url.to_string(),
            token_url: format!("{}{}", api_base_url.trim_end_matches('/'), TOKEN_PATH),
        }
    }
}

/// HubSpot OAuth provider.
///
/// Builds the consent URL and exchanges authorization codes for a credential
/// blob. Refresh is not handled; an expired token means reconnecting.
pub struct Provider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    scopes: String,
    urls: ProviderUrls,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new HubSpot OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `client_id` - HubSpot app client ID
    /// * `client_secret` - HubSpot app client secret
    /// * `redirect_uri` - OAuth redirect URI registered with the app
    /// * `scopes` - Space separated scopes to request
    /// * `urls` - Consent and token endpoints
    /// * `http_client` - Client used for the code exchange, expected to carry a timeout
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        redirect_uri: String,
        scopes: String,
        urls: ProviderUrls,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes,
            urls,
            http_client,
        }
    }

    /// Generate the authorization URL the user is sent to for consent.
    pub fn authorization_url(&self, state: &str) -> AuthorizationRequest {
        let url = format!(
            "{}?\
            client_id={}&\
            redirect_uri={}&\
            scope={}&\
            state={}",
            self.urls.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes),
            urlencoding::encode(state)
        );

        AuthorizationRequest {
            url,
            state: state.to_string(),
        }
    }

    /// Exchange an authorization code for a credential blob.
    ///
    /// # Returns
    ///
    /// The token endpoint's response as a `Credential`. A non-success status is
    /// `OAuthErrorKind::TokenExchangeFailed` carrying the status and body.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, Error> {
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            redirect_uri: &self.redirect_uri,
            code,
        };

        debug!("Exchanging HubSpot OAuth code for tokens");

        let response = self
            .http_client
            .post(&self.urls.token_url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&request)
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach HubSpot token endpoint: {:?}", e))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("HubSpot token exchange failed with status {}", status);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed {
                    status: status.as_u16(),
                    body: text.clone(),
                },
                &format!("Failed to retrieve access token: {text}"),
            ));
        }

        let credential = Credential::parse(&text).map_err(|e| {
            warn!("HubSpot token response was not a usable credential: {}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;

        info!("Successfully exchanged HubSpot OAuth code for tokens");
        Ok(credential)
    }
}
