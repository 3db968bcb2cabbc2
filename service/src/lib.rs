use config::Config;
use integration_auth::store::{MemoryStore, Store};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub mod config;
pub mod logging;

/// Create the in-process store and start a background sweep that drops expired
/// entries every `store_purge_interval`.
pub fn init_store(config: &Config) -> (Arc<MemoryStore>, JoinHandle<()>) {
    info!(
        "Store config: pending_auth_ttl={}s, purge_interval={}s",
        config.pending_auth_ttl_secs, config.store_purge_interval_secs,
    );

    let store = Arc::new(MemoryStore::new());
    let sweeper_store = Arc::clone(&store);
    // tokio panics on a zero period
    let interval = config.store_purge_interval().max(Duration::from_secs(1));

    let sweeper = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            sweeper_store.purge_expired();
        }
    });

    (store, sweeper)
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            config: app_config,
        }
    }

    pub fn store_ref(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
