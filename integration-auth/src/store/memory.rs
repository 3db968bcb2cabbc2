//! In-process store backed by a concurrent map.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::Store;
use crate::error::{store_error, Error, StoreErrorKind};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Key-value store kept in memory with lazy expiry.
///
/// Expired entries are dropped when read, and in bulk by `purge_expired`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every expired entry, returning how many were dropped.
    ///
    /// Should be called periodically so abandoned authorizations don't pile up.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!("Purged {} expired store entries", purged);
        }
        purged
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let now = Utc::now();
        match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        // The read guard is released above; drop the stale entry.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), Error> {
        let expires_at = match ttl {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl).map_err(|_| {
                    store_error(StoreErrorKind::InvalidExpiry, "Expiry is out of range")
                })?;
                Some(Utc::now() + ttl)
            }
            None => None,
        };

        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("key", "value", None).await.unwrap();

        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("key", "first", None).await.unwrap();
        store.set("key", "second", None).await.unwrap();

        assert_eq!(store.get("key").await.unwrap(), Some("second".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.set("key", "value", None).await.unwrap();
        store.delete("key").await.unwrap();

        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let store = MemoryStore::new();
        store
            .set("key", "value", Some(Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(store.get("key").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unexpired_entry_is_readable() {
        let store = MemoryStore::new();
        store
            .set("key", "value", Some(Duration::from_secs(600)))
            .await
            .unwrap();

        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryStore::new();
        store.set("stale", "a", Some(Duration::ZERO)).await.unwrap();
        store.set("fresh", "b", Some(Duration::from_secs(600))).await.unwrap();
        store.set("forever", "c", None).await.unwrap();

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("fresh").await.unwrap(), Some("b".to_string()));
        assert_eq!(store.get("forever").await.unwrap(), Some("c".to_string()));
    }
}
