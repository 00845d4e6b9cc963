use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::client::backend::{HttpBackend, ReqwestBackend, Sleeper, TokioSleeper};
use crate::client::transport::{ApiRequest, RetryPolicy, Transport};
use crate::config::SpaceTradersConfig;
use crate::error::ApiError;
use crate::models::*;

/// Typed SpaceTraders endpoints on top of the retrying transport.
#[derive(Clone)]
pub struct SpaceTradersClient {
    transport: Transport,
}

impl SpaceTradersClient {
    pub fn new(token: &str, config: &SpaceTradersConfig) -> Result<Self, ApiError> {
        let backend = ReqwestBackend::new(
            token,
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_seconds),
        )?;
        let policy = RetryPolicy::from_config(&config.retry, config.api.page_size);
        Ok(Self::with_backend(Arc::new(backend), Arc::new(TokioSleeper), policy))
    }

    pub fn with_backend(
        backend: Arc<dyn HttpBackend>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport: Transport::new(backend, sleeper, policy),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let data = self.transport.request(request).await?;
        Ok(serde_json::from_value(data)?)
    }

    // Agent operations
    pub async fn get_agent(&self) -> Result<Agent, ApiError> {
        self.fetch(ApiRequest::get("/my/agent")).await
    }

    // Ship operations
    pub async fn get_ships(&self) -> Result<Vec<Ship>, ApiError> {
        self.fetch(ApiRequest::get("/my/ships").paginated()).await
    }

    pub async fn orbit_ship(&self, ship_symbol: &str) -> Result<ShipNav, ApiError> {
        let url = format!("/my/ships/{}/orbit", ship_symbol);
        let data: NavData = self.fetch(ApiRequest::post(url)).await?;
        Ok(data.nav)
    }

    pub async fn dock_ship(&self, ship_symbol: &str) -> Result<ShipNav, ApiError> {
        let url = format!("/my/ships/{}/dock", ship_symbol);
        let data: NavData = self.fetch(ApiRequest::post(url)).await?;
        Ok(data.nav)
    }

    pub async fn navigate_ship(&self, ship_symbol: &str, waypoint_symbol: &str) -> Result<NavigationData, ApiError> {
        let url = format!("/my/ships/{}/navigate", ship_symbol);
        let payload = json!({
            "waypointSymbol": waypoint_symbol
        });
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    /// Extraction is the operation most likely to hit a 409 cooldown; the
    /// transport waits it out before retrying.
    pub async fn extract_resources(&self, ship_symbol: &str) -> Result<ExtractionData, ApiError> {
        let url = format!("/my/ships/{}/extract", ship_symbol);
        self.fetch(ApiRequest::post(url)).await
    }

    /// Extract using a survey from [`create_survey`](Self::create_survey);
    /// the survey is sent back unchanged as the request body.
    pub async fn extract_with_survey(&self, ship_symbol: &str, survey: &Survey) -> Result<ExtractionData, ApiError> {
        let url = format!("/my/ships/{}/extract/survey", ship_symbol);
        let payload = serde_json::to_value(survey)?;
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    pub async fn create_survey(&self, ship_symbol: &str) -> Result<SurveyData, ApiError> {
        let url = format!("/my/ships/{}/survey", ship_symbol);
        self.fetch(ApiRequest::post(url)).await
    }

    pub async fn refine_materials(&self, ship_symbol: &str, produce: &str) -> Result<RefineData, ApiError> {
        let url = format!("/my/ships/{}/refine", ship_symbol);
        let payload = json!({
            "produce": produce
        });
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    /// Refuel at the current market. Without `units` the tank is filled.
    pub async fn refuel_ship(&self, ship_symbol: &str, units: Option<i32>) -> Result<RefuelData, ApiError> {
        let url = format!("/my/ships/{}/refuel", ship_symbol);
        let payload = match units {
            Some(units) => json!({ "units": units }),
            None => json!({}),
        };
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    pub async fn set_flight_mode(&self, ship_symbol: &str, flight_mode: &str) -> Result<ShipNav, ApiError> {
        let url = format!("/my/ships/{}/nav", ship_symbol);
        let payload = json!({
            "flightMode": flight_mode
        });
        let data: NavData = self.fetch(ApiRequest::new(Method::PATCH, url).body(payload)).await?;
        Ok(data.nav)
    }

    pub async fn jettison_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> Result<ShipCargo, ApiError> {
        let url = format!("/my/ships/{}/jettison", ship_symbol);
        let payload = json!({
            "symbol": trade_symbol,
            "units": units
        });
        let data: JettisonData = self.fetch(ApiRequest::post(url).body(payload)).await?;
        Ok(data.cargo)
    }

    pub async fn sell_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> Result<SellCargoData, ApiError> {
        let url = format!("/my/ships/{}/sell", ship_symbol);
        let payload = json!({
            "symbol": trade_symbol,
            "units": units
        });
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    pub async fn purchase_ship(&self, ship_type: &str, waypoint_symbol: &str) -> Result<PurchaseShipData, ApiError> {
        let payload = json!({
            "shipType": ship_type,
            "waypointSymbol": waypoint_symbol
        });
        self.fetch(ApiRequest::post("/my/ships").body(payload)).await
    }

    // Contract operations
    pub async fn get_contracts(&self) -> Result<Vec<Contract>, ApiError> {
        self.fetch(ApiRequest::get("/my/contracts").paginated()).await
    }

    pub async fn negotiate_contract(&self, ship_symbol: &str) -> Result<Contract, ApiError> {
        let url = format!("/my/ships/{}/negotiate/contract", ship_symbol);
        let data: NegotiateContractData = self.fetch(ApiRequest::post(url)).await?;
        Ok(data.contract)
    }

    pub async fn accept_contract(&self, contract_id: &str) -> Result<ContractAcceptData, ApiError> {
        let url = format!("/my/contracts/{}/accept", contract_id);
        self.fetch(ApiRequest::post(url)).await
    }

    pub async fn deliver_contract(
        &self,
        contract_id: &str,
        ship_symbol: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<DeliverCargoData, ApiError> {
        let url = format!("/my/contracts/{}/deliver", contract_id);
        let payload = json!({
            "shipSymbol": ship_symbol,
            "tradeSymbol": trade_symbol,
            "units": units
        });
        self.fetch(ApiRequest::post(url).body(payload)).await
    }

    pub async fn fulfill_contract(&self, contract_id: &str) -> Result<FulfillContractData, ApiError> {
        let url = format!("/my/contracts/{}/fulfill", contract_id);
        self.fetch(ApiRequest::post(url)).await
    }

    // System operations
    pub async fn list_waypoints_all(&self, system_symbol: &str) -> Result<Vec<Waypoint>, ApiError> {
        let url = format!("/systems/{}/waypoints", system_symbol);
        self.fetch(ApiRequest::get(url).paginated()).await
    }

    /// Prices are only included when one of our ships is at the waypoint.
    pub async fn get_market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, ApiError> {
        let url = format!("/systems/{}/waypoints/{}/market", system_symbol, waypoint_symbol);
        self.fetch(ApiRequest::get(url)).await
    }

    pub async fn get_shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Shipyard, ApiError> {
        let url = format!("/systems/{}/waypoints/{}/shipyard", system_symbol, waypoint_symbol);
        self.fetch(ApiRequest::get(url)).await
    }
}
