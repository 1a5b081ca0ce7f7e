//! API endpoint implementations.

mod agents;
mod context;
mod decision;

pub use agents::AgentsApi;
pub use context::{ContextApi, ListOperationsQuery};
pub use decision::DecisionsApi;

/// Query carrying the `t` timestamp parameter.
#[derive(Debug, serde::Serialize)]
pub(crate) struct AtQuery {
    pub t: i64,
}
