//! Agents API.

use crate::client::CraftClient;
use crate::error::Result;
use crate::types::{Agent, CreateAgentRequest, Model, validate_agent_id};

/// Agents API client.
pub struct AgentsApi {
    client: CraftClient,
}

impl AgentsApi {
    pub(crate) fn new(client: CraftClient) -> Self {
        Self { client }
    }

    /// Create an agent learning from `model`.
    ///
    /// Without an `id` the service generates one; read it from the returned
    /// agent.
    pub async fn create(&self, model: &Model, id: Option<&str>) -> Result<Agent> {
        model.validate()?;
        if let Some(id) = id {
            validate_agent_id(id)?;
        }
        let request = CreateAgentRequest { id, model };
        self.client.post("agents", &request).await
    }

    /// Get an agent, its model and the span of its context operations.
    pub async fn get(&self, id: &str) -> Result<Agent> {
        validate_agent_id(id)?;
        self.client.get(&format!("agents/{}", id)).await
    }

    /// Delete an agent.
    pub async fn delete(&self, id: &str) -> Result<()> {
        validate_agent_id(id)?;
        self.client.delete(&format!("agents/{}", id)).await
    }
}
