use serde::{Deserialize, Serialize};

use crate::models::agent::Agent;
use crate::models::ship::{Ship, ShipEngine, ShipFrame, ShipModule, ShipMount, ShipReactor};

/// Shipyard at a waypoint.
///
/// `ships` and `transactions` are only returned while one of the agent's
/// ships is present at the waypoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Shipyard {
    pub symbol: String,
    #[serde(rename = "shipTypes")]
    pub ship_types: Vec<ShipyardShipType>,
    pub transactions: Option<Vec<ShipyardTransaction>>,
    pub ships: Option<Vec<ShipyardShip>>,
    #[serde(rename = "modificationsFee")]
    pub modifications_fee: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipyardShipType {
    #[serde(rename = "type")]
    pub ship_type: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipyardTransaction {
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: String,
    #[serde(rename = "shipSymbol")]
    pub ship_symbol: Option<String>,
    #[serde(rename = "shipType")]
    pub ship_type: Option<String>,
    pub price: i32,
    #[serde(rename = "agentSymbol")]
    pub agent_symbol: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipyardShip {
    #[serde(rename = "type")]
    pub ship_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub supply: Option<String>,
    pub activity: Option<String>,
    #[serde(rename = "purchasePrice")]
    pub purchase_price: i32,
    pub frame: ShipFrame,
    pub reactor: ShipReactor,
    pub engine: ShipEngine,
    pub modules: Vec<ShipModule>,
    pub mounts: Vec<ShipMount>,
    pub crew: ShipCrewRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCrewRequirements {
    pub required: i32,
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PurchaseShipData {
    pub agent: Agent,
    pub ship: Ship,
    pub transaction: ShipyardTransaction,
}
