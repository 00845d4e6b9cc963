//! Cached access to the API.
//!
//! [`CachedClient`] pairs the typed client with the cache store and decides,
//! per entity, when the cached copy is good enough:
//!
//! | entity        | key                  | refreshed when                     |
//! |---------------|----------------------|------------------------------------|
//! | agent         | `agent_info`         | older than the agent TTL           |
//! | ship list     | `ship_list`          | older than the ship list TTL       |
//! | contract list | `contract_list`      | flagged dirty by a contract action |
//! | waypoints     | `waypoints_{system}` | never (until the cache is cleared) |
//! | market        | `market_{waypoint}`  | every call, merged on prices       |
//! | shipyard      | `shipyard_{waypoint}`| every call, merged on ships        |

pub mod cache_keys;
pub mod cache_merge;
pub mod freshness;

mod agent;
mod contracts;
mod ships;
mod systems;

pub use systems::{normalize_good_symbol, GoodLocations, MarketGoods, SystemGoods};

use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::SpaceTradersClient;
use crate::config::SpaceTradersConfig;
use crate::storage::{CacheMap, CacheStore};

/// Whether a market or shipyard read may be served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Always ask the API, merging with the cached copy.
    #[default]
    Refresh,
    /// Use a readable cached copy when there is one.
    PreferCache,
}

#[derive(Clone)]
pub struct CachedClient {
    client: SpaceTradersClient,
    cache: CacheStore,
    agent_ttl: Duration,
    ship_list_ttl: Duration,
}

impl CachedClient {
    pub fn new(client: SpaceTradersClient, cache: CacheStore) -> Self {
        Self {
            client,
            cache,
            agent_ttl: Duration::hours(1),
            ship_list_ttl: Duration::hours(1),
        }
    }

    pub fn from_config(client: SpaceTradersClient, config: &SpaceTradersConfig) -> Self {
        Self::new(client, CacheStore::new(&config.cache.path))
            .with_ttls(config.cache.agent_ttl(), config.cache.ship_list_ttl())
    }

    pub fn with_ttls(mut self, agent_ttl: Duration, ship_list_ttl: Duration) -> Self {
        self.agent_ttl = agent_ttl;
        self.ship_list_ttl = ship_list_ttl;
        self
    }

    /// Remove the cache file. Returns whether there was one.
    pub fn clear_cache(&self) -> std::io::Result<bool> {
        self.cache.clear()
    }
}

/// Decode the `data` of a cache entry, logging why it could not be used.
fn entry_data<T: DeserializeOwned>(entry: &Value, key: &str) -> Option<T> {
    let Some(data) = entry.get("data") else {
        warn!(key, "Invalid cache entry: no data");
        return None;
    };
    match T::deserialize(data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Invalid cache entry");
            None
        }
    }
}

/// Data of a TTL-governed entry, if it was written less than `ttl` ago.
fn read_within_ttl<T: DeserializeOwned>(cache: &CacheMap, key: &str, ttl: Duration) -> Option<T> {
    let entry = cache.get(key)?;

    let last_updated = entry
        .get("last_updated")
        .and_then(Value::as_str)
        .and_then(freshness::parse_timestamp);
    let Some(last_updated) = last_updated else {
        warn!(key, "Invalid cache entry: missing or unreadable last_updated");
        return None;
    };

    if !freshness::is_within_ttl(last_updated, ttl, Utc::now()) {
        debug!(key, %last_updated, "Cache entry is stale");
        return None;
    }

    let data = entry_data(entry, key);
    if data.is_some() {
        debug!(key, "Cache hit");
    }
    data
}

fn to_cache_data<T: Serialize>(key: &str, value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(key, error = %e, "Failed to serialize entity for cache");
            None
        }
    }
}

/// Store `value` under `key` as `{last_updated, data}`.
fn store_timestamped<T: Serialize>(store: &CacheStore, cache: &mut CacheMap, key: String, value: &T) {
    let Some(data) = to_cache_data(&key, value) else {
        return;
    };
    cache.insert(
        key,
        json!({
            "last_updated": freshness::now_timestamp(),
            "data": data,
        }),
    );
    store.save(cache);
}
