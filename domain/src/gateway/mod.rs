//! Clients for external provider APIs.

pub mod hubspot;
