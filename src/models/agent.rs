use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Agent {
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    pub symbol: String,
    pub headquarters: String,
    pub credits: i64,
    #[serde(rename = "startingFaction")]
    pub starting_faction: String,
    #[serde(rename = "shipCount")]
    pub ship_count: i32,
}

impl Agent {
    pub fn home_system(&self) -> String {
        crate::models::waypoint::system_symbol_of(&self.headquarters)
    }
}
