// Agent info, cached for the agent TTL
use tracing::debug;

use super::{cache_keys, read_within_ttl, store_timestamped, CachedClient};
use crate::error::ApiError;
use crate::models::Agent;

impl CachedClient {
    pub async fn get_agent_info(&self) -> Result<Agent, ApiError> {
        let key = cache_keys::agent();
        let mut cache = self.cache.load();

        if let Some(agent) = read_within_ttl::<Agent>(&cache, &key, self.agent_ttl) {
            return Ok(agent);
        }

        debug!("Fetching agent info");
        let agent = self.client.get_agent().await?;
        store_timestamped(&self.cache, &mut cache, key, &agent);
        Ok(agent)
    }

    /// System of the agent's headquarters.
    pub async fn default_system(&self) -> Result<String, ApiError> {
        let agent = self.get_agent_info().await?;
        Ok(agent.home_system())
    }
}
