//! Transient key-value storage for pending authorizations and credentials.

mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Error;

pub use memory::MemoryStore;

/// Trait for a key-value store with optional per-key expiry.
///
/// Implementations must make each operation atomic for a single key. Entries
/// whose expiry has passed are reported as absent by `get`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// * `key` - Entry key
    /// * `value` - Entry value
    /// * `ttl` - Time to live, `None` keeps the entry until overwritten or deleted
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), Error>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), Error>;
}
