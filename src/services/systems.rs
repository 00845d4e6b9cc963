// Waypoints, markets and shipyards
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::cache_merge::{smart_merge, DetailCached};
use super::{cache_keys, entry_data, freshness, store_timestamped, to_cache_data, CachedClient, FetchMode};
use crate::error::ApiError;
use crate::models::{Market, Shipyard, TradeGood, Waypoint};

/// Goods traded at one marketplace, without prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketGoods {
    /// Exports and exchange goods: what the market sells to us.
    pub sells: Vec<TradeGood>,
    /// Imports and exchange goods: what the market buys from us.
    pub buys: Vec<TradeGood>,
}

/// Waypoints trading one good.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoodLocations {
    pub sells: Vec<String>,
    pub buys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemGoods {
    pub by_waypoint: BTreeMap<String, MarketGoods>,
    pub by_good: BTreeMap<String, GoodLocations>,
}

impl SystemGoods {
    /// Markets buying `buys` and selling `sells`; a filter left out matches
    /// every market. Good symbols match ignoring case, with `-` read as `_`.
    pub fn markets_trading(&self, buys: Option<&str>, sells: Option<&str>) -> BTreeMap<String, MarketGoods> {
        let buys = buys.map(normalize_good_symbol);
        let sells = sells.map(normalize_good_symbol);

        self.by_waypoint
            .iter()
            .filter(|(_, goods)| buys.as_deref().is_none_or(|b| trades(&goods.buys, b)))
            .filter(|(_, goods)| sells.as_deref().is_none_or(|s| trades(&goods.sells, s)))
            .map(|(waypoint, goods)| (waypoint.clone(), goods.clone()))
            .collect()
    }
}

/// `iron-ore` and `Iron_Ore` both become `IRON_ORE`.
pub fn normalize_good_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase().replace('-', "_")
}

fn trades(goods: &[TradeGood], symbol: &str) -> bool {
    goods.iter().any(|g| normalize_good_symbol(&g.symbol) == symbol)
}

impl CachedClient {
    /// Every waypoint in a system. Waypoints do not change, so the first
    /// listing is kept until the cache is cleared.
    pub async fn list_waypoints_all(&self, system_symbol: &str) -> Result<Vec<Waypoint>, ApiError> {
        let key = cache_keys::waypoints(system_symbol);
        let mut cache = self.cache.load();

        if let Some(entry) = cache.get(&key) {
            if let Some(waypoints) = entry_data::<Vec<Waypoint>>(entry, &key) {
                debug!(key = %key, "Cache hit");
                return Ok(waypoints);
            }
        }

        info!(system = system_symbol, "Fetching waypoints");
        let waypoints = self.client.list_waypoints_all(system_symbol).await?;
        store_timestamped(&self.cache, &mut cache, key, &waypoints);
        Ok(waypoints)
    }

    /// Waypoints carrying every one of `traits`. No traits means all waypoints.
    pub async fn list_waypoints(&self, system_symbol: &str, traits: &[String]) -> Result<Vec<Waypoint>, ApiError> {
        let waypoints = self.list_waypoints_all(system_symbol).await?;
        Ok(waypoints
            .into_iter()
            .filter(|wp| traits.iter().all(|t| wp.has_trait(t)))
            .collect())
    }

    pub async fn get_market(
        &self,
        system_symbol: &str,
        waypoint_symbol: &str,
        mode: FetchMode,
    ) -> Result<Market, ApiError> {
        let key = cache_keys::market(waypoint_symbol);
        let client = self.client.clone();
        self.fetch_merged(key, mode, || async move {
            client.get_market(system_symbol, waypoint_symbol).await
        })
        .await
    }

    pub async fn get_shipyard(
        &self,
        system_symbol: &str,
        waypoint_symbol: &str,
        mode: FetchMode,
    ) -> Result<Shipyard, ApiError> {
        let key = cache_keys::shipyard(waypoint_symbol);
        let client = self.client.clone();
        self.fetch_merged(key, mode, || async move {
            client.get_shipyard(system_symbol, waypoint_symbol).await
        })
        .await
    }

    /// Fetch an entity and reconcile it with its cached copy. The entry keeps
    /// `last_updated` for the entity and `T::TIMESTAMP_FIELD` for its detail.
    async fn fetch_merged<T, F, Fut>(&self, key: String, mode: FetchMode, fetch: F) -> Result<T, ApiError>
    where
        T: DetailCached + Serialize,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let mut cache = self.cache.load();

        if mode == FetchMode::PreferCache {
            if let Some(cached) = cache.get(&key).and_then(|entry| entry_data::<T>(entry, &key)) {
                debug!(key = %key, "Cache hit");
                return Ok(cached);
            }
        }

        let fresh = fetch().await?;
        let (entity, detail_updated) = smart_merge(cache.get(&key), fresh, Some(T::DEFAULT_REFRESH));

        if let Some(data) = to_cache_data(&key, &entity) {
            let mut entry = json!({
                "last_updated": freshness::now_timestamp(),
                "data": data,
            });
            entry[T::TIMESTAMP_FIELD] = json!(detail_updated);
            cache.insert(key, entry);
            self.cache.save(&cache);
        }
        Ok(entity)
    }

    /// Goods bought and sold across every marketplace in a system.
    ///
    /// Markets are read cache-first since only the good lists are used.
    pub async fn list_system_goods(&self, system_symbol: &str) -> Result<SystemGoods, ApiError> {
        let waypoints = self.list_waypoints_all(system_symbol).await?;

        let mut goods = SystemGoods::default();
        let mut sold_at: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut bought_at: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for waypoint in waypoints.iter().filter(|wp| wp.is_marketplace()) {
            let market = self
                .get_market(system_symbol, &waypoint.symbol, FetchMode::PreferCache)
                .await?;

            let sells = unique_sorted(market.exports.iter().chain(market.exchange.iter()));
            let buys = unique_sorted(market.imports.iter().chain(market.exchange.iter()));

            for good in &sells {
                sold_at
                    .entry(good.symbol.clone())
                    .or_default()
                    .insert(waypoint.symbol.clone());
            }
            for good in &buys {
                bought_at
                    .entry(good.symbol.clone())
                    .or_default()
                    .insert(waypoint.symbol.clone());
            }

            goods
                .by_waypoint
                .insert(waypoint.symbol.clone(), MarketGoods { sells, buys });
        }

        let symbols: BTreeSet<&String> = sold_at.keys().chain(bought_at.keys()).collect();
        for symbol in symbols {
            let locations = GoodLocations {
                sells: sold_at.get(symbol).map(|s| s.iter().cloned().collect()).unwrap_or_default(),
                buys: bought_at.get(symbol).map(|s| s.iter().cloned().collect()).unwrap_or_default(),
            };
            goods.by_good.insert(symbol.clone(), locations);
        }

        Ok(goods)
    }
}

/// First occurrence of each symbol, sorted by symbol.
fn unique_sorted<'a>(goods: impl Iterator<Item = &'a TradeGood>) -> Vec<TradeGood> {
    let mut seen = BTreeSet::new();
    let mut out: Vec<TradeGood> = goods
        .filter(|g| seen.insert(g.symbol.clone()))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    out
}
