use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Identifies whose HubSpot connection a request refers to.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ConnectionParams {
    #[serde(default)]
    #[schema(example = "user-1")]
    pub(crate) user_id: String,
    #[serde(default)]
    #[schema(example = "org-1")]
    pub(crate) org_id: String,
}

/// Query string HubSpot appends when redirecting back after consent.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CallbackParams {
    /// Authorization code to exchange for tokens
    pub(crate) code: Option<String>,
    /// State token issued by the authorize endpoint
    pub(crate) state: Option<String>,
    /// Set by HubSpot when the user denied access or the request was invalid
    pub(crate) error: Option<String>,
    pub(crate) error_description: Option<String>,
}

/// A credential blob as returned by the credentials endpoint, JSON encoded.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoadParams {
    #[serde(default)]
    #[schema(example = r#"{"access_token":"...","refresh_token":"...","expires_in":1800}"#)]
    pub(crate) credentials: String,
}
