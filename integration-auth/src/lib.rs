//! # integration-auth
//!
//! Authentication plumbing for connecting third-party accounts:
//! - OAuth 2.0 authorization-code flow with signed CSRF state tokens
//! - HubSpot OAuth provider
//! - Credential blobs returned by token endpoints
//! - Transient key-value storage with expiry
//! - HTTP client building with bounded timeouts
//!
//! ## Architecture
//!
//! This crate knows nothing about users, organizations or web requests. The
//! `domain` crate composes these pieces into the connect flow and decides which
//! store keys hold what.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use integration_auth::{
//!     oauth::{providers::hubspot, StateToken},
//!     store::{MemoryStore, Store},
//!     http::HttpClientBuilder,
//! };
//! ```

pub mod credentials;
pub mod error;
pub mod http;
pub mod oauth;
pub mod store;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
