//! Context operations API.

use tracing::debug;

use super::AtQuery;
use crate::client::CraftClient;
use crate::error::Result;
use crate::types::{ContextOperation, ContextState, validate_agent_id};

/// Query parameters for listing operations.
#[derive(Debug, Default, serde::Serialize)]
pub struct ListOperationsQuery {
    /// Only operations at or after this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Only operations at or before this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Context operations API client.
pub struct ContextApi {
    client: CraftClient,
}

impl ContextApi {
    pub(crate) fn new(client: CraftClient) -> Self {
        Self { client }
    }

    /// Post context operations for an agent to learn from.
    pub async fn add_operations(&self, id: &str, operations: &[ContextOperation]) -> Result<()> {
        validate_agent_id(id)?;
        if operations.is_empty() {
            debug!(agent = id, "no context operations to send");
            return Ok(());
        }
        self.client
            .post_unit(&format!("agents/{}/context", id), operations)
            .await
    }

    /// List every operation previously posted to an agent.
    pub async fn list_operations(&self, id: &str) -> Result<Vec<ContextOperation>> {
        validate_agent_id(id)?;
        self.client.get(&format!("agents/{}/context", id)).await
    }

    /// List operations within a timestamp window.
    pub async fn list_operations_with_query(
        &self,
        id: &str,
        query: ListOperationsQuery,
    ) -> Result<Vec<ContextOperation>> {
        validate_agent_id(id)?;
        self.client
            .get_with_query(&format!("agents/{}/context", id), &query)
            .await
    }

    /// Get the agent's context state at a timestamp.
    pub async fn state(&self, id: &str, timestamp: i64) -> Result<ContextState> {
        validate_agent_id(id)?;
        self.client
            .get_with_query(
                &format!("agents/{}/context/state", id),
                &AtQuery { t: timestamp },
            )
            .await
    }
}
