use crate::controller::{health_check_controller, hubspot_controller};
use crate::{params, AppState};
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "CRM Connect API"
        ),
        paths(
            health_check_controller::health_check,
            hubspot_controller::authorize,
            hubspot_controller::oauth2callback,
            hubspot_controller::credentials,
            hubspot_controller::load,
        ),
        components(
            schemas(
                domain::IntegrationItem,
                params::hubspot::ConnectionParams,
                params::hubspot::LoadParams,
            )
        ),
        tags(
            (name = "crm_connect", description = "Connect a HubSpot account and load its contacts")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(hubspot_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn hubspot_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/integrations/hubspot/authorize",
            post(hubspot_controller::authorize),
        )
        .route(
            "/integrations/hubspot/oauth2callback",
            get(hubspot_controller::oauth2callback),
        )
        .route(
            "/integrations/hubspot/credentials",
            post(hubspot_controller::credentials),
        )
        .route("/integrations/hubspot/load", post(hubspot_controller::load))
        .with_state(app_state)
}
