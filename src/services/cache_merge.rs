//! Reconciling freshly fetched markets and shipyards with cached copies.
//!
//! Both entities carry a detail field (prices for markets, purchasable ships
//! for shipyards) that the API only fills in while one of our ships is at the
//! waypoint. A remote query returns the detail as null, and blindly caching
//! that would throw away the last prices we saw. The merge keeps the cached
//! detail, refreshes the rest from the new response, and tracks when the
//! detail itself was last observed.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Market, Shipyard};
use crate::services::freshness::now_timestamp;

/// An entity with a detail field worth keeping across remote fetches.
pub trait DetailCached: DeserializeOwned + Sized {
    /// Fields that can be refreshed from a fresh copy.
    type Field: Copy + PartialEq + std::fmt::Debug + 'static;

    /// Name used in log messages.
    const KIND: &'static str;
    /// Cache entry field holding the time the detail was last observed.
    const TIMESTAMP_FIELD: &'static str;
    /// Every field except the detail field.
    const ALL_FIELDS: &'static [Self::Field];
    /// Fields the caching strategy refreshes when it keeps the cached detail.
    const DEFAULT_REFRESH: &'static [Self::Field];

    fn has_detail(&self) -> bool;

    fn refresh_field(&mut self, fresh: &Self, field: Self::Field);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketField {
    Symbol,
    Exports,
    Imports,
    Exchange,
    Transactions,
}

impl DetailCached for Market {
    type Field = MarketField;

    const KIND: &'static str = "market";
    const TIMESTAMP_FIELD: &'static str = "prices_updated";
    const ALL_FIELDS: &'static [MarketField] = &[
        MarketField::Symbol,
        MarketField::Exports,
        MarketField::Imports,
        MarketField::Exchange,
        MarketField::Transactions,
    ];
    const DEFAULT_REFRESH: &'static [MarketField] = &[
        MarketField::Exports,
        MarketField::Imports,
        MarketField::Exchange,
    ];

    fn has_detail(&self) -> bool {
        self.trade_goods.is_some()
    }

    fn refresh_field(&mut self, fresh: &Self, field: MarketField) {
        match field {
            MarketField::Symbol => self.symbol = fresh.symbol.clone(),
            MarketField::Exports => self.exports = fresh.exports.clone(),
            MarketField::Imports => self.imports = fresh.imports.clone(),
            MarketField::Exchange => self.exchange = fresh.exchange.clone(),
            MarketField::Transactions => self.transactions = fresh.transactions.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipyardField {
    Symbol,
    ShipTypes,
    Transactions,
    ModificationsFee,
}

impl DetailCached for Shipyard {
    type Field = ShipyardField;

    const KIND: &'static str = "shipyard";
    const TIMESTAMP_FIELD: &'static str = "ships_updated";
    const ALL_FIELDS: &'static [ShipyardField] = &[
        ShipyardField::Symbol,
        ShipyardField::ShipTypes,
        ShipyardField::Transactions,
        ShipyardField::ModificationsFee,
    ];
    const DEFAULT_REFRESH: &'static [ShipyardField] = &[ShipyardField::ShipTypes];

    fn has_detail(&self) -> bool {
        self.ships.is_some()
    }

    fn refresh_field(&mut self, fresh: &Self, field: ShipyardField) {
        match field {
            ShipyardField::Symbol => self.symbol = fresh.symbol.clone(),
            ShipyardField::ShipTypes => self.ship_types = fresh.ship_types.clone(),
            ShipyardField::Transactions => self.transactions = fresh.transactions.clone(),
            ShipyardField::ModificationsFee => self.modifications_fee = fresh.modifications_fee,
        }
    }
}

/// Merge a fresh entity with the cached entry for the same waypoint.
///
/// Returns the entity to hand out and store, and the detail timestamp to
/// store next to it:
/// - fresh copy has the detail: the fresh copy, stamped now
/// - cached copy has the detail: the cached copy with `refresh` fields (all
///   non-detail fields when `None`) taken from the fresh copy, keeping the
///   cached timestamp
/// - otherwise: the fresh copy and no timestamp
///
/// An unreadable cached entry is logged and treated as absent.
pub fn smart_merge<T: DetailCached>(
    cached_entry: Option<&Value>,
    fresh: T,
    refresh: Option<&[T::Field]>,
) -> (T, Option<String>) {
    if fresh.has_detail() {
        debug!(kind = T::KIND, "Fresh copy has detail, using it");
        return (fresh, Some(now_timestamp()));
    }

    if let Some(entry) = cached_entry {
        match cached_data::<T>(entry) {
            Ok(mut cached) if cached.has_detail() => {
                let fields = refresh.unwrap_or(T::ALL_FIELDS);
                for field in fields {
                    cached.refresh_field(&fresh, *field);
                }
                let timestamp = entry
                    .get(T::TIMESTAMP_FIELD)
                    .and_then(Value::as_str)
                    .map(str::to_string);
                debug!(kind = T::KIND, ?fields, "Kept cached detail, refreshed other fields");
                return (cached, timestamp);
            }
            Ok(_) => {}
            Err(reason) => {
                warn!(kind = T::KIND, %reason, "Failed to merge cached entry");
            }
        }
    }

    debug!(kind = T::KIND, "No detail in fresh or cached copy");
    (fresh, None)
}

fn cached_data<T: DeserializeOwned>(entry: &Value) -> Result<T, String> {
    let data = entry
        .get("data")
        .ok_or_else(|| "entry has no data".to_string())?;
    T::deserialize(data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarketTradeGood, TradeGood};
    use serde_json::json;

    fn good(symbol: &str) -> TradeGood {
        TradeGood {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            description: String::new(),
        }
    }

    fn priced(symbol: &str, price: i32) -> MarketTradeGood {
        MarketTradeGood {
            symbol: symbol.to_string(),
            good_type: Some("EXPORT".to_string()),
            trade_volume: 10,
            supply: "MODERATE".to_string(),
            activity: None,
            purchase_price: price,
            sell_price: price - 2,
        }
    }

    fn market(exports: &[&str], trade_goods: Option<Vec<MarketTradeGood>>) -> Market {
        Market {
            symbol: "X1-AB12-C3".to_string(),
            exports: exports.iter().map(|s| good(s)).collect(),
            imports: vec![good("FUEL")],
            exchange: vec![],
            transactions: None,
            trade_goods,
        }
    }

    fn entry(market: &Market, prices_updated: Option<&str>) -> Value {
        json!({
            "last_updated": "2025-01-01T00:00:00+00:00",
            "prices_updated": prices_updated,
            "data": serde_json::to_value(market).unwrap(),
        })
    }

    #[test]
    fn test_fresh_detail_wins() {
        let cached = entry(&market(&["IRON_ORE"], Some(vec![priced("IRON_ORE", 40)])), Some("old"));
        let fresh = market(&["COPPER_ORE"], Some(vec![priced("COPPER_ORE", 55)]));

        let (merged, stamp) = smart_merge(Some(&cached), fresh.clone(), Some(Market::DEFAULT_REFRESH));
        assert_eq!(merged, fresh);
        let stamp = stamp.unwrap();
        assert_ne!(stamp, "old");
        assert!(crate::services::freshness::parse_timestamp(&stamp).is_some());
    }

    #[test]
    fn test_cached_detail_preserved() {
        let prices = vec![priced("IRON_ORE", 40)];
        let cached = entry(&market(&["IRON_ORE"], Some(prices.clone())), Some("2025-01-01T00:00:00+00:00"));
        let fresh = market(&["IRON_ORE", "COPPER_ORE"], None);

        let (merged, stamp) = smart_merge(Some(&cached), fresh, Some(Market::DEFAULT_REFRESH));
        assert_eq!(merged.trade_goods, Some(prices));
        assert_eq!(merged.exports.len(), 2);
        assert_eq!(stamp.as_deref(), Some("2025-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_only_listed_fields_refreshed() {
        let mut cached_market = market(&["IRON_ORE"], Some(vec![priced("IRON_ORE", 40)]));
        cached_market.imports = vec![good("WATER")];
        let cached = entry(&cached_market, None);
        let fresh = market(&["COPPER_ORE"], None);

        let (merged, stamp) = smart_merge(Some(&cached), fresh, Some(&[MarketField::Exports]));
        assert_eq!(merged.exports[0].symbol, "COPPER_ORE");
        assert_eq!(merged.imports[0].symbol, "WATER");
        assert_eq!(stamp, None);
    }

    #[test]
    fn test_no_refresh_list_updates_everything_but_detail() {
        let mut cached_market = market(&["IRON_ORE"], Some(vec![priced("IRON_ORE", 40)]));
        cached_market.imports = vec![good("WATER")];
        let cached = entry(&cached_market, None);
        let fresh = market(&["COPPER_ORE"], None);

        let (merged, _) = smart_merge(Some(&cached), fresh, None);
        assert_eq!(merged.imports[0].symbol, "FUEL");
        assert!(merged.trade_goods.is_some());
    }

    #[test]
    fn test_neither_has_detail() {
        let cached = entry(&market(&["IRON_ORE"], None), Some("2025-01-01T00:00:00+00:00"));
        let fresh = market(&["COPPER_ORE"], None);

        let (merged, stamp) = smart_merge(Some(&cached), fresh.clone(), Some(Market::DEFAULT_REFRESH));
        assert_eq!(merged, fresh);
        assert_eq!(stamp, None);
    }

    #[test]
    fn test_corrupt_cached_entry_falls_back_to_fresh() {
        let fresh = market(&["COPPER_ORE"], None);

        for broken in [json!({"data": {"symbol": 7}}), json!({"no_data": true}), json!("text")] {
            let (merged, stamp) = smart_merge(Some(&broken), fresh.clone(), None);
            assert_eq!(merged, fresh);
            assert_eq!(stamp, None);
        }
    }

    #[test]
    fn test_shipyard_keeps_fee_and_transactions() {
        let cached = json!({
            "ships_updated": "2025-02-02T00:00:00+00:00",
            "data": {
                "symbol": "X1-AB12-C3",
                "shipTypes": [{"type": "SHIP_PROBE"}],
                "transactions": [],
                "ships": [],
                "modificationsFee": 100
            }
        });
        let fresh = Shipyard {
            symbol: "X1-AB12-C3".to_string(),
            ship_types: vec![
                crate::models::ShipyardShipType { ship_type: "SHIP_PROBE".to_string() },
                crate::models::ShipyardShipType { ship_type: "SHIP_MINING_DRONE".to_string() },
            ],
            transactions: None,
            ships: None,
            modifications_fee: 250,
        };

        let (merged, stamp) = smart_merge(Some(&cached), fresh, Some(Shipyard::DEFAULT_REFRESH));
        assert_eq!(merged.ship_types.len(), 2);
        assert_eq!(merged.modifications_fee, 100);
        assert_eq!(merged.transactions, Some(vec![]));
        assert_eq!(merged.ships, Some(vec![]));
        assert_eq!(stamp.as_deref(), Some("2025-02-02T00:00:00+00:00"));
    }
}
