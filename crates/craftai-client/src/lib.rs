//! HTTP client SDK for the craft ai decision-tree service.
//!
//! This crate provides a typed client for the craft ai API: agents learn from
//! timestamped context operations and the service computes decision trees
//! from them.
//!
//! # Example
//!
//! ```no_run
//! use craftai_client::{ContextOperation, CraftClient, Model, PropertyType, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = CraftClient::builder()
//!     .owner("gisele")
//!     .token("secret")
//!     .build()?;
//!
//! let model = Model::builder()
//!     .property("externalTemp", PropertyType::Continuous)
//!     .generated("time", PropertyType::TimeOfDay)
//!     .property("internalTemp", PropertyType::Enum)
//!     .output("internalTemp")
//!     .time_quantum(60)
//!     .build()?;
//!
//! let agent = client.agents().create(&model, Some("thermostat")).await?;
//!
//! client
//!     .context()
//!     .add_operations(
//!         &agent.id,
//!         &[ContextOperation::new(1469410200)
//!             .with("externalTemp", 18.0)
//!             .with("internalTemp", "warm")],
//!     )
//!     .await?;
//!
//! let tree = client.decisions().tree(&agent.id, 1469410200).await?;
//! println!("tree version: {:?}", tree.version());
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Agents**: create, get, delete
//! - **Context**: add operations, list operations, state at a timestamp
//! - **Decisions**: decision tree at a timestamp, decide for a context

pub mod api;
pub mod client;
pub mod error;
pub mod time;
pub mod types;

pub use client::{ClientBuilder, CraftClient, DEFAULT_URL};
pub use error::{Error, Result};
pub use time::Time;
pub use types::*;

pub use api::ListOperationsQuery;
