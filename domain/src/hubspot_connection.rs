//! The HubSpot connect flow: authorization URL, OAuth callback, credential
//! readback and contact fetch.
//!
//! Every piece of state that crosses requests lives in the `Store` under
//! `pending_auth:{organization_id}:{user_id}` (short lived) and
//! `credential:{organization_id}:{user_id}` (kept until overwritten).

use crate::error::{
    domain_error, DomainErrorKind, Error, InternalErrorKind, STATE_MISMATCH_MESSAGE,
};
use crate::gateway::hubspot::HubSpotClient;
use crate::integration_item::IntegrationItem;
use integration_auth::credentials::Credential;
use integration_auth::http::HttpClientBuilder;
use integration_auth::oauth::providers::hubspot::Provider;
use integration_auth::oauth::{ProviderUrls, StateToken};
use integration_auth::store::Store;
use log::*;
use secrecy::SecretString;
use service::config::Config;

/// Number of contacts requested per fetch. Only the first page is read.
pub const CONTACTS_PAGE_LIMIT: u32 = 10;

// Ids are joined with `:`, so `require_ids` keeps `:` out of them.
fn pending_auth_key(organization_id: &str, user_id: &str) -> String {
    format!("pending_auth:{organization_id}:{user_id}")
}

fn credential_key(organization_id: &str, user_id: &str) -> String {
    format!("credential:{organization_id}:{user_id}")
}

fn config_error(message: &str) -> Error {
    domain_error(DomainErrorKind::Internal(InternalErrorKind::Config), message)
}

fn client_secret(config: &Config) -> Result<String, Error> {
    config
        .hubspot_client_secret()
        .filter(|secret| !secret.is_empty())
        .ok_or_else(|| config_error("HubSpot client secret is not configured"))
}

fn require_ids(user_id: &str, organization_id: &str) -> Result<(), Error> {
    if user_id.trim().is_empty() || organization_id.trim().is_empty() {
        return Err(domain_error(
            DomainErrorKind::Validation,
            "user_id and org_id are required.",
        ));
    }
    if user_id.contains(':') || organization_id.contains(':') {
        return Err(domain_error(
            DomainErrorKind::Validation,
            "user_id and org_id must not contain ':'.",
        ));
    }
    Ok(())
}

/// Build the HubSpot OAuth provider from configuration.
pub fn create_hubspot_provider(config: &Config) -> Result<Provider, Error> {
    let client_id = config
        .hubspot_client_id()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| config_error("HubSpot client ID is not configured"))?;
    let client_secret = client_secret(config)?;

    if config.hubspot_redirect_uri().is_empty() {
        return Err(config_error("HubSpot redirect URI is not configured"));
    }

    let http_client = HttpClientBuilder::new()
        .with_timeout(config.http_timeout())
        .build()?;

    Ok(Provider::new(
        client_id,
        SecretString::new(client_secret),
        config.hubspot_redirect_uri().to_string(),
        config.hubspot_scopes().to_string(),
        ProviderUrls::hubspot(
            config.hubspot_authorize_url(),
            config.hubspot_api_base_url(),
        ),
        http_client,
    ))
}

/// Start the connect flow for a user within an organization.
///
/// Stores a fresh state token under the pending authorization key with the
/// configured expiry and returns the HubSpot consent URL carrying it. Calling
/// again replaces any earlier pending authorization for the same pair.
pub async fn authorize(
    store: &dyn Store,
    config: &Config,
    user_id: &str,
    organization_id: &str,
) -> Result<String, Error> {
    require_ids(user_id, organization_id)?;

    let provider = create_hubspot_provider(config)?;
    let state = StateToken::generate(organization_id, user_id)
        .encode(client_secret(config)?.as_bytes())?;

    store
        .set(
            &pending_auth_key(organization_id, user_id),
            &state,
            Some(config.pending_auth_ttl()),
        )
        .await
        .inspect_err(|e| warn!("Failed to store pending HubSpot authorization: {:?}", e))?;

    info!(
        "Redirecting user {} of organization {} to HubSpot OAuth",
        user_id, organization_id
    );
    Ok(provider.authorization_url(&state).url)
}

/// Finish the connect flow from the provider's callback.
///
/// The state names the pending authorization it belongs to; it must match the
/// stored value exactly. On a successful code exchange the pending entry is
/// removed and the token response is stored verbatim. A failed exchange leaves
/// the pending entry in place.
pub async fn complete_authorization(
    store: &dyn Store,
    config: &Config,
    code: &str,
    state: &str,
) -> Result<(), Error> {
    if code.is_empty() {
        return Err(domain_error(
            DomainErrorKind::Validation,
            "Missing authorization code.",
        ));
    }

    let token = StateToken::decode(state, client_secret(config)?.as_bytes()).inspect_err(|e| {
        warn!("Rejected HubSpot OAuth callback with undecodable state: {}", e)
    })?;
    let organization_id = token.organization_id();
    let user_id = token.user_id();
    let pending_key = pending_auth_key(organization_id, user_id);

    match store.get(&pending_key).await? {
        Some(pending) if pending == state => {}
        _ => {
            warn!(
                "No matching pending HubSpot authorization for user {} of organization {}",
                user_id, organization_id
            );
            return Err(domain_error(
                DomainErrorKind::Authentication,
                STATE_MISMATCH_MESSAGE,
            ));
        }
    }

    let provider = create_hubspot_provider(config)?;
    let credential = provider.exchange_code(code).await.inspect_err(|e| {
        warn!(
            "Failed to exchange HubSpot OAuth code for user {}: {:?}",
            user_id, e
        )
    })?;

    store.delete(&pending_key).await?;
    store
        .set(
            &credential_key(organization_id, user_id),
            credential.as_json(),
            None,
        )
        .await?;

    info!(
        "Stored HubSpot credentials for user {} of organization {}",
        user_id, organization_id
    );
    Ok(())
}

/// Read back the stored credential blob for a user within an organization.
pub async fn get_credentials(
    store: &dyn Store,
    user_id: &str,
    organization_id: &str,
) -> Result<serde_json::Value, Error> {
    require_ids(user_id, organization_id)?;

    let raw = store
        .get(&credential_key(organization_id, user_id))
        .await?
        .ok_or_else(|| {
            domain_error(
                DomainErrorKind::NotFound,
                "HubSpot credentials not found. Please connect first.",
            )
        })?;

    serde_json::from_str(&raw).map_err(|e| {
        warn!(
            "Stored HubSpot credentials for user {} could not be decoded: {:?}",
            user_id, e
        );
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Stored credentials are not valid JSON".to_string(),
            )),
        }
    })
}

/// Fetch the first page of HubSpot contacts with a credential blob and
/// normalize them into `IntegrationItem`s.
pub async fn get_items(
    config: &Config,
    credentials_json: &str,
) -> Result<Vec<IntegrationItem>, Error> {
    let credential = Credential::parse(credentials_json)?;

    let client = HubSpotClient::new(
        credential.access_token(),
        config.hubspot_api_base_url(),
        config.http_timeout(),
    )?;
    let contacts = client.list_contacts(CONTACTS_PAGE_LIMIT).await?;

    Ok(contacts.iter().map(IntegrationItem::from).collect())
}
