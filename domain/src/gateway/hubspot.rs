//! HubSpot CRM API client.
//!
//! This module provides an HTTP client for reading CRM contact records with an
//! access token obtained through the OAuth connect flow.

use crate::error::{domain_error, DomainErrorKind, Error, InternalErrorKind, UpstreamErrorKind};
use integration_auth::http::HttpClientBuilder;
use log::*;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Contact properties requested from HubSpot.
pub const CONTACT_PROPERTIES: &str = "firstname,lastname,email,createdate,lastmodifieddate";

const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";

/// Properties of a HubSpot contact. Any of them may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactProperties {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub createdate: Option<String>,
    #[serde(default)]
    pub lastmodifieddate: Option<String>,
}

/// A contact record from the CRM objects API
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub properties: ContactProperties,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

/// One page of contacts
#[derive(Debug, Deserialize)]
struct ContactsPage {
    #[serde(default)]
    results: Vec<Contact>,
}

/// HubSpot CRM client authenticated with a bearer token
pub struct HubSpotClient {
    client: reqwest::Client,
    base_url: String,
}

impl HubSpotClient {
    /// Create a new HubSpot client with the given access token and base URL
    pub fn new(
        access_token: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = HttpClientBuilder::new()
            .with_timeout(timeout)
            .with_bearer_token(access_token.expose_secret())?
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the first page of contacts, at most `limit` records.
    pub async fn list_contacts(&self, limit: u32) -> Result<Vec<Contact>, Error> {
        let url = format!("{}{}", self.base_url, CONTACTS_PATH);
        let limit = limit.to_string();

        debug!("Fetching up to {} HubSpot contacts", limit);

        let response = self
            .client
            .get(&url)
            .query(&[("properties", CONTACT_PROPERTIES), ("limit", limit.as_str())])
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach HubSpot contacts API: {:?}", e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("HubSpot rejected the access token");
            return Err(domain_error(
                DomainErrorKind::Authentication,
                "HubSpot token is invalid or has expired. Please reconnect.",
            ));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("HubSpot contacts API error ({}): {}", status, error_text);
            return Err(domain_error(
                DomainErrorKind::Upstream(UpstreamErrorKind::Status {
                    status: status.as_u16(),
                    body: error_text.clone(),
                }),
                &format!("Error fetching HubSpot data: {error_text}"),
            ));
        }

        let page: ContactsPage = response.json().await.map_err(|e| {
            warn!("Failed to parse HubSpot contacts response: {:?}", e);
            domain_error(
                DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid response from HubSpot".to_string(),
                )),
                &format!("An unexpected error occurred: {e}"),
            )
        })?;

        info!("Fetched {} HubSpot contacts", page.results.len());
        Ok(page.results)
    }
}
