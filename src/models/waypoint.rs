use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Waypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    #[serde(rename = "systemSymbol")]
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub orbitals: Vec<Orbital>,
    pub orbits: Option<String>,
    #[serde(default)]
    pub traits: Vec<Trait>,
    pub chart: Option<Chart>,
    pub faction: Option<WaypointFaction>,
    #[serde(rename = "isUnderConstruction", default)]
    pub is_under_construction: bool,
}

impl Waypoint {
    pub fn has_trait(&self, trait_symbol: &str) -> bool {
        self.traits.iter().any(|t| t.symbol == trait_symbol)
    }

    pub fn is_marketplace(&self) -> bool {
        self.has_trait("MARKETPLACE")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Orbital {
    pub symbol: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Trait {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Chart {
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: Option<String>,
    #[serde(rename = "submittedBy")]
    pub submitted_by: Option<String>,
    #[serde(rename = "submittedOn")]
    pub submitted_on: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WaypointFaction {
    pub symbol: String,
}

/// System symbol a waypoint belongs to (`X1-AB12-C3` -> `X1-AB12`).
pub fn system_symbol_of(waypoint_symbol: &str) -> String {
    waypoint_symbol
        .split('-')
        .take(2)
        .collect::<Vec<&str>>()
        .join("-")
}
