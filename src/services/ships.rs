// Ship list (TTL cached) and ship actions
use tracing::debug;

use super::{cache_keys, read_within_ttl, store_timestamped, CachedClient};
use crate::error::{ApiError, ShipLookupError};
use crate::models::{
    ExtractionData, NavigationData, PurchaseShipData, RefineData, RefuelData, SellCargoData, Ship, ShipCargo,
    ShipNav, Survey, SurveyData,
};

impl CachedClient {
    pub async fn list_ships(&self) -> Result<Vec<Ship>, ApiError> {
        let key = cache_keys::ship_list();
        let mut cache = self.cache.load();

        if let Some(ships) = read_within_ttl::<Vec<Ship>>(&cache, &key, self.ship_list_ttl) {
            return Ok(ships);
        }

        debug!("Fetching ship list");
        let ships = self.client.get_ships().await?;
        store_timestamped(&self.cache, &mut cache, key, &ships);
        Ok(ships)
    }

    /// Turn a ship argument into a ship symbol.
    ///
    /// A number is a 0-based index into the ship list sorted by symbol;
    /// anything else is taken as the symbol itself.
    pub async fn resolve_ship_symbol(&self, ship: &str) -> Result<String, ShipLookupError> {
        let Ok(index) = ship.trim().parse::<usize>() else {
            return Ok(ship.trim().to_string());
        };

        let mut symbols: Vec<String> = self
            .list_ships()
            .await?
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        symbols.sort();

        let count = symbols.len();
        symbols
            .into_iter()
            .nth(index)
            .ok_or(ShipLookupError::IndexOutOfRange { index, count })
    }

    // Ship actions go straight to the API; the ship list catches up on TTL expiry.

    pub async fn orbit_ship(&self, ship_symbol: &str) -> Result<ShipNav, ApiError> {
        self.client.orbit_ship(ship_symbol).await
    }

    pub async fn dock_ship(&self, ship_symbol: &str) -> Result<ShipNav, ApiError> {
        self.client.dock_ship(ship_symbol).await
    }

    pub async fn navigate_ship(&self, ship_symbol: &str, waypoint_symbol: &str) -> Result<NavigationData, ApiError> {
        self.client.navigate_ship(ship_symbol, waypoint_symbol).await
    }

    pub async fn extract_resources(&self, ship_symbol: &str) -> Result<ExtractionData, ApiError> {
        self.client.extract_resources(ship_symbol).await
    }

    pub async fn extract_with_survey(&self, ship_symbol: &str, survey: &Survey) -> Result<ExtractionData, ApiError> {
        self.client.extract_with_survey(ship_symbol, survey).await
    }

    pub async fn create_survey(&self, ship_symbol: &str) -> Result<SurveyData, ApiError> {
        self.client.create_survey(ship_symbol).await
    }

    pub async fn refine_materials(&self, ship_symbol: &str, produce: &str) -> Result<RefineData, ApiError> {
        self.client.refine_materials(ship_symbol, produce).await
    }

    pub async fn refuel_ship(&self, ship_symbol: &str, units: Option<i32>) -> Result<RefuelData, ApiError> {
        self.client.refuel_ship(ship_symbol, units).await
    }

    pub async fn set_flight_mode(&self, ship_symbol: &str, flight_mode: &str) -> Result<ShipNav, ApiError> {
        self.client.set_flight_mode(ship_symbol, flight_mode).await
    }

    pub async fn jettison_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> Result<ShipCargo, ApiError> {
        self.client.jettison_cargo(ship_symbol, trade_symbol, units).await
    }

    pub async fn sell_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> Result<SellCargoData, ApiError> {
        self.client.sell_cargo(ship_symbol, trade_symbol, units).await
    }

    /// Buying a ship changes the fleet, so the cached ship list is dropped
    /// rather than left to expire.
    pub async fn purchase_ship(&self, ship_type: &str, waypoint_symbol: &str) -> Result<PurchaseShipData, ApiError> {
        let data = self.client.purchase_ship(ship_type, waypoint_symbol).await?;
        self.forget_ship_list();
        Ok(data)
    }

    fn forget_ship_list(&self) {
        let mut cache = self.cache.load();
        if cache.remove(&cache_keys::ship_list()).is_some() {
            self.cache.save(&cache);
            debug!("Dropped cached ship list");
        }
    }
}
