// Shared test helpers: a scripted HTTP backend, a sleeper that only records,
// and JSON fixtures shaped like real API responses.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spacetraders_cache::client::{HttpBackend, HttpRequest, HttpResponse, RetryPolicy, Sleeper};
use spacetraders_cache::error::ApiError;
use spacetraders_cache::{CacheStore, CachedClient, SpaceTradersClient};

type Handler = Box<dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync>;

/// Backend answering from a queue of canned responses or a handler function,
/// recording every request it sees.
pub struct ScriptedBackend {
    queue: Mutex<VecDeque<HttpResponse>>,
    handler: Option<Handler>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedBackend {
    pub fn queue(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(responses.into()),
            handler: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn handler(f: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(VecDeque::new()),
            handler: Some(Box::new(f)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpBackend for ScriptedBackend {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(handler) = &self.handler {
            return Ok(handler(request));
        }
        let next = self.queue.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| {
            json_response(500, json!({"error": {"message": format!("unscripted request to {}", request.path)}}))
        }))
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub fn client_with(backend: Arc<ScriptedBackend>, sleeper: Arc<RecordingSleeper>) -> SpaceTradersClient {
    SpaceTradersClient::with_backend(backend, sleeper, RetryPolicy::default())
}

pub fn cached_client(backend: Arc<ScriptedBackend>, cache_path: &std::path::Path) -> CachedClient {
    CachedClient::new(client_with(backend, RecordingSleeper::new()), CacheStore::new(cache_path))
}

pub fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// Responses

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json; charset=utf-8".to_string()),
        body: body.to_string(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("text/plain".to_string()),
        body: body.to_string(),
    }
}

pub fn ok_data(data: Value) -> HttpResponse {
    json_response(200, json!({ "data": data }))
}

pub fn page(items: Vec<Value>, total: u64, page: u64, limit: u64) -> HttpResponse {
    json_response(
        200,
        json!({
            "data": items,
            "meta": {"total": total, "page": page, "limit": limit}
        }),
    )
}

pub fn cooldown_response(remaining_seconds: f64) -> HttpResponse {
    json_response(
        409,
        json!({
            "error": {
                "message": "Ship action is still on cooldown",
                "code": 4000,
                "data": {
                    "cooldown": {
                        "shipSymbol": "AGENT-1",
                        "totalSeconds": 70,
                        "remainingSeconds": remaining_seconds,
                        "expiration": "2025-01-01T00:01:10.000Z"
                    }
                }
            }
        }),
    )
}

pub fn rate_limited() -> HttpResponse {
    json_response(429, json!({"error": {"message": "Too many requests", "code": 429}}))
}

// Fixtures

pub fn agent_json(credits: i64) -> Value {
    json!({
        "accountId": "acc-1",
        "symbol": "AGENT",
        "headquarters": "X1-AB12-A1",
        "credits": credits,
        "startingFaction": "COSMIC",
        "shipCount": 2
    })
}

fn requirements() -> Value {
    json!({"power": 1, "crew": 0, "slots": 1})
}

fn route_waypoint(symbol: &str) -> Value {
    json!({"symbol": symbol, "type": "PLANET", "systemSymbol": "X1-AB12", "x": 1, "y": 2})
}

pub fn nav_json(status: &str) -> Value {
    json!({
        "systemSymbol": "X1-AB12",
        "waypointSymbol": "X1-AB12-A1",
        "route": {
            "destination": route_waypoint("X1-AB12-A1"),
            "origin": route_waypoint("X1-AB12-A1"),
            "departureTime": "2025-01-01T00:00:00.000Z",
            "arrival": "2025-01-01T00:00:00.000Z"
        },
        "status": status,
        "flightMode": "CRUISE"
    })
}

pub fn ship_json(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "registration": {"name": symbol, "factionSymbol": "COSMIC", "role": "COMMAND"},
        "nav": nav_json("DOCKED"),
        "crew": {"current": 1, "required": 1, "capacity": 10, "rotation": "STRICT", "morale": 100, "wages": 0},
        "frame": {
            "symbol": "FRAME_FRIGATE", "name": "Frigate", "description": "",
            "condition": 1.0, "integrity": 1.0,
            "moduleSlots": 8, "mountingPoints": 5, "fuelCapacity": 400,
            "requirements": requirements()
        },
        "reactor": {
            "symbol": "REACTOR_FISSION_I", "name": "Fission Reactor I",
            "condition": 1.0, "integrity": 1.0, "powerOutput": 31,
            "requirements": requirements()
        },
        "engine": {
            "symbol": "ENGINE_ION_DRIVE_II", "name": "Ion Drive II",
            "condition": 1.0, "integrity": 1.0, "speed": 30,
            "requirements": requirements()
        },
        "cooldown": {"shipSymbol": symbol, "totalSeconds": 0, "remainingSeconds": 0},
        "modules": [],
        "mounts": [],
        "cargo": {"capacity": 40, "units": 0, "inventory": []},
        "fuel": {"current": 400, "capacity": 400}
    })
}

pub fn contract_json(id: &str, accepted: bool) -> Value {
    json!({
        "id": id,
        "factionSymbol": "COSMIC",
        "type": "PROCUREMENT",
        "terms": {
            "deadline": "2025-02-01T00:00:00.000Z",
            "payment": {"onAccepted": 1000, "onFulfilled": 5000},
            "deliver": [{
                "tradeSymbol": "IRON_ORE",
                "destinationSymbol": "X1-AB12-A1",
                "unitsRequired": 50,
                "unitsFulfilled": 0
            }]
        },
        "accepted": accepted,
        "fulfilled": false,
        "deadlineToAccept": "2025-01-15T00:00:00.000Z"
    })
}

pub fn waypoint_json(symbol: &str, traits: &[&str]) -> Value {
    let traits: Vec<Value> = traits
        .iter()
        .map(|t| json!({"symbol": t, "name": t, "description": ""}))
        .collect();
    json!({
        "symbol": symbol,
        "type": "PLANET",
        "systemSymbol": "X1-AB12",
        "x": 10,
        "y": -4,
        "orbitals": [],
        "traits": traits,
        "isUnderConstruction": false
    })
}

fn goods(symbols: &[&str]) -> Value {
    Value::Array(
        symbols
            .iter()
            .map(|s| json!({"symbol": s, "name": s, "description": ""}))
            .collect(),
    )
}

/// Market as seen from afar: no prices.
pub fn market_json(symbol: &str, exports: &[&str], imports: &[&str], exchange: &[&str]) -> Value {
    json!({
        "symbol": symbol,
        "exports": goods(exports),
        "imports": goods(imports),
        "exchange": goods(exchange)
    })
}

/// Market as seen with a ship present.
pub fn priced_market_json(symbol: &str, exports: &[&str], price: i32) -> Value {
    let mut market = market_json(symbol, exports, &["FUEL"], &[]);
    market["tradeGoods"] = Value::Array(
        exports
            .iter()
            .map(|s| {
                json!({
                    "symbol": s,
                    "type": "EXPORT",
                    "tradeVolume": 60,
                    "supply": "HIGH",
                    "activity": "GROWING",
                    "purchasePrice": price,
                    "sellPrice": price - 4
                })
            })
            .collect(),
    );
    market["transactions"] = json!([]);
    market
}

pub fn shipyard_json(symbol: &str, ship_types: &[&str], with_ships: bool) -> Value {
    let types: Vec<Value> = ship_types.iter().map(|t| json!({"type": t})).collect();
    let mut shipyard = json!({
        "symbol": symbol,
        "shipTypes": types,
        "modificationsFee": 100
    });
    if with_ships {
        shipyard["ships"] = json!([{
            "type": "SHIP_PROBE",
            "name": "Probe",
            "description": "",
            "supply": "ABUNDANT",
            "purchasePrice": 25000,
            "frame": {
                "symbol": "FRAME_PROBE", "name": "Probe",
                "moduleSlots": 0, "mountingPoints": 0, "fuelCapacity": 0,
                "requirements": requirements()
            },
            "reactor": {"symbol": "REACTOR_SOLAR_I", "name": "Solar Reactor I", "powerOutput": 3, "requirements": requirements()},
            "engine": {"symbol": "ENGINE_IMPULSE_DRIVE_I", "name": "Impulse Drive I", "speed": 9, "requirements": requirements()},
            "modules": [],
            "mounts": [],
            "crew": {"required": 0, "capacity": 0}
        }]);
        shipyard["transactions"] = json!([]);
    }
    shipyard
}
