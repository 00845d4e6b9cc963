use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Ship {
    pub symbol: String,
    pub registration: ShipRegistration,
    pub nav: ShipNav,
    pub crew: ShipCrew,
    pub frame: ShipFrame,
    pub reactor: ShipReactor,
    pub engine: ShipEngine,
    pub cooldown: ShipCooldown,
    pub modules: Vec<ShipModule>,
    pub mounts: Vec<ShipMount>,
    pub cargo: ShipCargo,
    pub fuel: ShipFuel,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipRegistration {
    pub name: String,
    #[serde(rename = "factionSymbol")]
    pub faction_symbol: String,
    pub role: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipNav {
    #[serde(rename = "systemSymbol")]
    pub system_symbol: String,
    #[serde(rename = "waypointSymbol")]
    pub waypoint_symbol: String,
    pub route: ShipRoute,
    pub status: String,
    #[serde(rename = "flightMode")]
    pub flight_mode: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipRoute {
    pub destination: ShipRouteWaypoint,
    pub origin: ShipRouteWaypoint,
    #[serde(rename = "departureTime")]
    pub departure_time: String,
    pub arrival: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipRouteWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    #[serde(rename = "systemSymbol")]
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCrew {
    pub current: i32,
    pub required: i32,
    pub capacity: i32,
    pub rotation: String,
    pub morale: i32,
    pub wages: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipFrame {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: Option<f64>,
    pub integrity: Option<f64>,
    #[serde(rename = "moduleSlots")]
    pub module_slots: i32,
    #[serde(rename = "mountingPoints")]
    pub mounting_points: i32,
    #[serde(rename = "fuelCapacity")]
    pub fuel_capacity: i32,
    pub requirements: ShipRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipReactor {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: Option<f64>,
    pub integrity: Option<f64>,
    #[serde(rename = "powerOutput")]
    pub power_output: i32,
    pub requirements: ShipRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipEngine {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: Option<f64>,
    pub integrity: Option<f64>,
    pub speed: i32,
    pub requirements: ShipRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipModule {
    pub symbol: String,
    pub capacity: Option<i32>,
    pub range: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub requirements: ShipRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipMount {
    pub symbol: String,
    pub name: String,
    pub description: Option<String>,
    pub strength: Option<i32>,
    pub deposits: Option<Vec<String>>,
    pub requirements: ShipRequirements,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipRequirements {
    pub power: Option<i32>,
    pub crew: Option<i32>,
    pub slots: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCooldown {
    #[serde(rename = "shipSymbol")]
    pub ship_symbol: String,
    #[serde(rename = "totalSeconds")]
    pub total_seconds: i32,
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: i32,
    pub expiration: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipCargo {
    pub capacity: i32,
    pub units: i32,
    pub inventory: Vec<CargoItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CargoItem {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipFuel {
    pub current: i32,
    pub capacity: i32,
    pub consumed: Option<ShipFuelConsumed>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShipFuelConsumed {
    pub amount: i32,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NavigationData {
    pub fuel: ShipFuel,
    pub nav: ShipNav,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NavData {
    pub nav: ShipNav,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtractionData {
    pub cooldown: ShipCooldown,
    pub extraction: Extraction,
    pub cargo: ShipCargo,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Extraction {
    #[serde(rename = "shipSymbol")]
    pub ship_symbol: String,
    #[serde(rename = "yield")]
    pub extraction_yield: ExtractionYield,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtractionYield {
    pub symbol: String,
    pub units: i32,
}

/// A survey of a waypoint's deposits.
///
/// Passed back verbatim to target an extraction, so every field the server
/// sent must survive a round trip.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Survey {
    pub signature: String,
    pub symbol: String,
    pub deposits: Vec<SurveyDeposit>,
    pub expiration: String,
    pub size: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SurveyDeposit {
    pub symbol: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SurveyData {
    pub cooldown: ShipCooldown,
    pub surveys: Vec<Survey>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JettisonData {
    pub cargo: ShipCargo,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RefineData {
    pub cargo: ShipCargo,
    pub cooldown: ShipCooldown,
    pub produced: Vec<RefineItem>,
    pub consumed: Vec<RefineItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RefineItem {
    #[serde(rename = "tradeSymbol")]
    pub trade_symbol: String,
    pub units: i32,
}
