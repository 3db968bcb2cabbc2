//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the authorization-code flow pieces: signed CSRF state tokens and
//! the HubSpot provider.

mod provider;
mod state;

pub mod providers;

pub use provider::{AuthorizationRequest, ProviderUrls};
pub use state::StateToken;
