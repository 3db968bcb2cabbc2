//! The HubSpot connect flow and contact fetch.
//!
//! `web` calls the functions in `hubspot_connection`; provider plumbing lives in
//! the `integration-auth` crate and the CRM API client in `gateway`.

pub use integration_auth::store::{MemoryStore, Store};

pub mod error;
pub mod gateway;
pub mod hubspot_connection;
pub mod integration_item;

pub use error::Error;
pub use integration_item::IntegrationItem;
