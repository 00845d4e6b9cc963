use serde::{Deserialize, Serialize};

use crate::models::agent::Agent;
use crate::models::ship::ShipCargo;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Contract {
    pub id: String,
    #[serde(rename = "factionSymbol")]
    pub faction_symbol: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub terms: ContractTerms,
    pub accepted: bool,
    pub fulfilled: bool,
    pub expiration: Option<String>,
    #[serde(rename = "deadlineToAccept")]
    pub deadline_to_accept: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContractTerms {
    pub deadline: String,
    pub payment: Payment,
    #[serde(default)]
    pub deliver: Vec<DeliveryItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
    #[serde(rename = "onAccepted")]
    pub on_accepted: i64,
    #[serde(rename = "onFulfilled")]
    pub on_fulfilled: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DeliveryItem {
    #[serde(rename = "tradeSymbol")]
    pub trade_symbol: String,
    #[serde(rename = "destinationSymbol")]
    pub destination_symbol: String,
    #[serde(rename = "unitsRequired")]
    pub units_required: i32,
    #[serde(rename = "unitsFulfilled")]
    pub units_fulfilled: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NegotiateContractData {
    pub contract: Contract,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContractAcceptData {
    pub contract: Contract,
    pub agent: Agent,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DeliverCargoData {
    pub contract: Contract,
    pub cargo: ShipCargo,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FulfillContractData {
    pub agent: Agent,
    pub contract: Contract,
}
