// Contract list, cached until a contract action marks it dirty
use serde_json::{json, Value};
use tracing::debug;

use super::{cache_keys, entry_data, freshness, to_cache_data, CachedClient};
use crate::error::ApiError;
use crate::models::{Contract, ContractAcceptData, DeliverCargoData, FulfillContractData};

impl CachedClient {
    pub async fn list_contracts(&self) -> Result<Vec<Contract>, ApiError> {
        let key = cache_keys::contract_list();
        let mut cache = self.cache.load();

        if let Some(entry) = cache.get(&key) {
            // Only an explicit `false` counts as clean.
            let clean = entry.get("is_dirty").and_then(Value::as_bool) == Some(false);
            if clean {
                if let Some(contracts) = entry_data::<Vec<Contract>>(entry, &key) {
                    debug!(key = %key, "Cache hit");
                    return Ok(contracts);
                }
            } else {
                debug!(key = %key, "Contract list is dirty");
            }
        }

        debug!("Fetching contracts");
        let contracts = self.client.get_contracts().await?;
        if let Some(data) = to_cache_data(&key, &contracts) {
            cache.insert(
                key,
                json!({
                    "last_updated": freshness::now_timestamp(),
                    "is_dirty": false,
                    "data": data,
                }),
            );
            self.cache.save(&cache);
        }
        Ok(contracts)
    }

    /// Flag the cached contract list for refetch. Leaves the timestamp and
    /// data alone; does nothing when there is no entry.
    pub fn mark_contract_list_dirty(&self) {
        let key = cache_keys::contract_list();
        let mut cache = self.cache.load();

        let Some(Value::Object(entry)) = cache.get_mut(&key) else {
            return;
        };
        entry.insert("is_dirty".to_string(), Value::Bool(true));
        self.cache.save(&cache);
        debug!("Marked contract list dirty");
    }

    pub async fn negotiate_contract(&self, ship_symbol: &str) -> Result<Contract, ApiError> {
        let contract = self.client.negotiate_contract(ship_symbol).await?;
        self.mark_contract_list_dirty();
        Ok(contract)
    }

    pub async fn accept_contract(&self, contract_id: &str) -> Result<ContractAcceptData, ApiError> {
        let data = self.client.accept_contract(contract_id).await?;
        self.mark_contract_list_dirty();
        Ok(data)
    }

    pub async fn deliver_contract(
        &self,
        contract_id: &str,
        ship_symbol: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<DeliverCargoData, ApiError> {
        let data = self
            .client
            .deliver_contract(contract_id, ship_symbol, trade_symbol, units)
            .await?;
        self.mark_contract_list_dirty();
        Ok(data)
    }

    pub async fn fulfill_contract(&self, contract_id: &str) -> Result<FulfillContractData, ApiError> {
        let data = self.client.fulfill_contract(contract_id).await?;
        self.mark_contract_list_dirty();
        Ok(data)
    }
}
