//! Decision API.

use super::AtQuery;
use crate::client::CraftClient;
use crate::error::{Error, Result};
use crate::types::{DecideRequest, Decision, DecisionTree, Properties, validate_agent_id};

/// Decision tree and decision API client.
///
/// Trees are computed and evaluated by the service.
pub struct DecisionsApi {
    client: CraftClient,
}

impl DecisionsApi {
    pub(crate) fn new(client: CraftClient) -> Self {
        Self { client }
    }

    /// Get the agent's decision tree as of a timestamp.
    pub async fn tree(&self, id: &str, timestamp: i64) -> Result<DecisionTree> {
        validate_agent_id(id)?;
        self.client
            .get_with_query(
                &format!("agents/{}/decision/tree", id),
                &AtQuery { t: timestamp },
            )
            .await
    }

    /// Ask for a decision in the given context.
    pub async fn decide(&self, id: &str, timestamp: i64, context: &Properties) -> Result<Decision> {
        validate_agent_id(id)?;
        if context.is_empty() {
            return Err(Error::Decision("context must not be empty".to_string()));
        }
        let request = DecideRequest { timestamp, context };
        self.client
            .post(&format!("agents/{}/decision", id), &request)
            .await
    }
}
