//! Controller for the HubSpot connect flow.
//!
//! The callback is reached through HubSpot's browser redirect and answers with a
//! page that closes the popup window the frontend opened for consent.

use crate::error::WebErrorKind;
use crate::extractors::form_data::FormData;
use crate::params::hubspot::{CallbackParams, ConnectionParams, LoadParams};
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;

use domain::{hubspot_connection, IntegrationItem};
use log::*;

const CLOSE_WINDOW_HTML: &str = "<html><script>window.close();</script></html>";

/// POST /integrations/hubspot/authorize
///
/// Starts the connect flow and returns the HubSpot consent URL.
#[utoipa::path(
    post,
    path = "/integrations/hubspot/authorize",
    request_body(content = ConnectionParams, content_type = "application/x-www-form-urlencoded", description = "Also accepted as multipart/form-data"),
    responses(
        (status = 200, description = "HubSpot consent URL", body = String),
        (status = 400, description = "Missing user_id or org_id"),
        (status = 500, description = "HubSpot OAuth is not configured"),
    )
)]
pub async fn authorize(
    State(app_state): State<AppState>,
    FormData(params): FormData<ConnectionParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST HubSpot authorize for user {}", params.user_id);

    let url = hubspot_connection::authorize(
        app_state.store_ref(),
        &app_state.config,
        &params.user_id,
        &params.org_id,
    )
    .await?;

    Ok(Json(url))
}

/// GET /integrations/hubspot/oauth2callback
///
/// Completes the connect flow after the user consented on HubSpot.
#[utoipa::path(
    get,
    path = "/integrations/hubspot/oauth2callback",
    params(CallbackParams),
    responses(
        (status = 200, description = "Credentials stored; the page closes its window", body = String, content_type = "text/html"),
        (status = 400, description = "HubSpot reported an error or sent no code"),
        (status = 401, description = "State does not match or has expired"),
    )
)]
pub async fn oauth2callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    if let Some(error) = params.error {
        let description = params.error_description.unwrap_or_default();
        warn!("HubSpot OAuth callback reported an error: {} {}", error, description);
        return Err(Error::Web(WebErrorKind::Input(
            format!("{error} {description}").trim().to_string(),
        )));
    }

    let code = params
        .code
        .ok_or_else(|| Error::Web(WebErrorKind::Input("Missing code".to_string())))?;
    let state = params.state.unwrap_or_default();

    hubspot_connection::complete_authorization(
        app_state.store_ref(),
        &app_state.config,
        &code,
        &state,
    )
    .await?;

    Ok(Html(CLOSE_WINDOW_HTML))
}

/// POST /integrations/hubspot/credentials
///
/// Returns the stored credential blob for a user within an organization.
#[utoipa::path(
    post,
    path = "/integrations/hubspot/credentials",
    request_body(content = ConnectionParams, content_type = "application/x-www-form-urlencoded", description = "Also accepted as multipart/form-data"),
    responses(
        (status = 200, description = "Token response stored at connect time", body = Object),
        (status = 404, description = "No HubSpot connection for the user"),
    )
)]
pub async fn credentials(
    State(app_state): State<AppState>,
    FormData(params): FormData<ConnectionParams>,
) -> Result<impl IntoResponse, Error> {
    let credentials =
        hubspot_connection::get_credentials(app_state.store_ref(), &params.user_id, &params.org_id)
            .await?;

    Ok(Json(credentials))
}

/// POST /integrations/hubspot/load
///
/// Fetches the first page of HubSpot contacts as integration items.
#[utoipa::path(
    post,
    path = "/integrations/hubspot/load",
    request_body(content = LoadParams, content_type = "application/x-www-form-urlencoded", description = "Also accepted as multipart/form-data"),
    responses(
        (status = 200, description = "Contacts as integration items", body = [IntegrationItem]),
        (status = 400, description = "Malformed or invalid credentials"),
        (status = 401, description = "HubSpot token is invalid or has expired"),
        (status = 502, description = "HubSpot could not be reached"),
    )
)]
pub async fn load(
    State(app_state): State<AppState>,
    FormData(params): FormData<LoadParams>,
) -> Result<impl IntoResponse, Error> {
    let items: Vec<IntegrationItem> =
        hubspot_connection::get_items(&app_state.config, &params.credentials).await?;

    debug!("Loaded {} HubSpot items", items.len());
    Ok(Json(items))
}
