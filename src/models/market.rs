use serde::{Deserialize, Serialize};

use crate::models::agent::Agent;
use crate::models::ship::{ShipCargo, ShipFuel};

/// Market at a waypoint.
///
/// `trade_goods` and `transactions` are only returned while one of the
/// agent's ships is present at the waypoint; queried from afar they are null.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Market {
    pub symbol: String,
    pub exports: Vec<TradeGood>,
    pub imports: Vec<TradeGood>,
    pub exchange: Vec<TradeGood>,
    pub transactions: Option<Vec<MarketTransaction>>,
    #[serde(rename = "tradeGoods")]
    pub trade_goods: Option<Vec<MarketTradeGood>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TradeGood {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarketTradeGood {
    pub symbol: String,
    #[serde(rename = "type")]
    pub good_type: Option<String>,
    #[serde(rename = "tradeVolume")]
    pub trade_volume: i32,
    pub supply: String,
    pub activity: Option<String>,
    #[serde(rename = "purchasePrice")]
    pub purchase_price: i32,
    #[serde(rename = "sellPrice")]
    pub sell_price: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarketTransaction {
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: String,
    #[serde(rename = "shipSymbol")]
    pub ship_symbol: String,
    #[serde(rename = "tradeSymbol")]
    pub trade_symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub units: i32,
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: i32,
    #[serde(rename = "totalPrice")]
    pub total_price: i32,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RefuelData {
    pub agent: Agent,
    pub fuel: ShipFuel,
    pub transaction: MarketTransaction,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SellCargoData {
    pub agent: Agent,
    pub cargo: ShipCargo,
    pub transaction: MarketTransaction,
}
