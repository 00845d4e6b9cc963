// SpaceTraders transport and cache library
// Retrying API client with a persistent JSON cache in front of it

pub mod models;
pub mod client;
pub mod storage;
pub mod services;
pub mod config;
pub mod error;
pub mod logging;

use std::fs;
use std::io::ErrorKind;

use crate::error::TokenError;

// Re-export commonly used types
pub use models::{
    agent::Agent,
    contract::{Contract, DeliveryItem},
    market::{Market, MarketTradeGood, TradeGood},
    ship::{Ship, ShipNav, ShipCargo, CargoItem},
    shipyard::Shipyard,
    waypoint::Waypoint,
};

pub use client::SpaceTradersClient;
pub use config::SpaceTradersConfig;
pub use error::{ApiError, ConfigError};
pub use services::{CachedClient, FetchMode};
pub use storage::CacheStore;

// Constants
pub const API_BASE_URL: &str = "https://api.spacetraders.io/v2";
pub const AGENT_TOKEN_FILE: &str = "AGENT_TOKEN";
pub const TOKEN_ENV_VAR: &str = "ST_TOKEN";

/// Resolve the API token: explicit value, then `ST_TOKEN`, then the
/// `AGENT_TOKEN` file in the working directory.
pub fn load_agent_token(explicit: Option<&str>) -> Result<String, TokenError> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    match fs::read_to_string(AGENT_TOKEN_FILE) {
        Ok(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
        Ok(_) => Err(TokenError::Missing {
            env: TOKEN_ENV_VAR,
            file: AGENT_TOKEN_FILE,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(TokenError::Missing {
            env: TOKEN_ENV_VAR,
            file: AGENT_TOKEN_FILE,
        }),
        Err(source) => Err(TokenError::Io {
            file: AGENT_TOKEN_FILE,
            source,
        }),
    }
}
