//! Request and response types for the craft ai API.
//!
//! These types mirror the service's JSON contract.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::Time;

/// Maximum length of an agent identifier.
pub const MAX_ID_SIZE: usize = 512;

/// Maximum number of properties (and of outputs) in a model.
pub const MAX_PROPERTIES: usize = 128;

/// Check that an identifier is usable as a URL path segment.
///
/// Returns the reason on failure.
pub(crate) fn validate_identifier(id: &str) -> std::result::Result<(), String> {
    if id.is_empty() {
        return Err("must not be empty".to_string());
    }
    if id.len() > MAX_ID_SIZE {
        return Err(format!("longer than {} characters", MAX_ID_SIZE));
    }
    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(format!("contains '{}'", c));
    }
    Ok(())
}

/// Validate an agent identifier before it is put in a URL.
pub fn validate_agent_id(id: &str) -> Result<()> {
    validate_identifier(id).map_err(|reason| Error::InvalidAgentId(format!("'{}' {}", id, reason)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// Type of a model property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Categorical string value.
    Enum,
    /// Numeric value.
    Continuous,
    /// Hours since local midnight, in `[0, 24)`.
    TimeOfDay,
    /// Day index, 0 = Monday.
    DayOfWeek,
    /// UTC offset such as `+02:00`.
    Timezone,
}

impl PropertyType {
    /// Whether the client can derive this property from a timestamp.
    pub fn is_time_derived(self) -> bool {
        matches!(
            self,
            PropertyType::TimeOfDay | PropertyType::DayOfWeek | PropertyType::Timezone
        )
    }
}

/// Definition of one model property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Property type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Whether the value is derived from the operation timestamp.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_generated: bool,
}

/// Schema an agent learns from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Input properties keyed by name.
    pub context: BTreeMap<String, PropertyDefinition>,
    /// Names of the properties to predict.
    pub output: Vec<String>,
    /// Time quantization period, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<u32>,
}

impl Model {
    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Check the model before it is sent to the service.
    pub fn validate(&self) -> Result<()> {
        if self.context.is_empty() {
            return Err(Error::InvalidModel("no properties defined".to_string()));
        }
        if self.context.len() > MAX_PROPERTIES {
            return Err(Error::InvalidModel(format!(
                "{} properties exceed the limit of {}",
                self.context.len(),
                MAX_PROPERTIES
            )));
        }
        if self.output.is_empty() {
            return Err(Error::InvalidModel("no output defined".to_string()));
        }
        if self.output.len() > MAX_PROPERTIES {
            return Err(Error::InvalidModel(format!(
                "{} outputs exceed the limit of {}",
                self.output.len(),
                MAX_PROPERTIES
            )));
        }
        if let Some(missing) = self.output.iter().find(|o| !self.context.contains_key(*o)) {
            return Err(Error::InvalidModel(format!(
                "output '{}' is not a declared property",
                missing
            )));
        }
        if self.time_quantum == Some(0) {
            return Err(Error::InvalidModel(
                "time_quantum must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Write derived values for every generated time property.
    ///
    /// Entries for other properties are left untouched.
    pub fn fill_generated(&self, context: &mut Properties, time: &Time) {
        for (name, definition) in &self.context {
            if !definition.is_generated {
                continue;
            }
            let value = match definition.property_type {
                PropertyType::TimeOfDay => PropertyValue::Number(time.time_of_day()),
                PropertyType::DayOfWeek => PropertyValue::Number(f64::from(time.day_of_week())),
                PropertyType::Timezone => PropertyValue::Text(time.timezone()),
                PropertyType::Enum | PropertyType::Continuous => continue,
            };
            context.insert(name.clone(), value);
        }
    }
}

/// Builder for [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    context: BTreeMap<String, PropertyDefinition>,
    output: Vec<String>,
    time_quantum: Option<u32>,
}

impl ModelBuilder {
    /// Declare a property supplied by context operations.
    pub fn property(mut self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.context.insert(
            name.into(),
            PropertyDefinition {
                property_type,
                is_generated: false,
            },
        );
        self
    }

    /// Declare a property derived from the timestamp.
    pub fn generated(mut self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.context.insert(
            name.into(),
            PropertyDefinition {
                property_type,
                is_generated: true,
            },
        );
        self
    }

    /// Add an output property.
    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.output.push(name.into());
        self
    }

    /// Set the time quantization period, in seconds.
    pub fn time_quantum(mut self, seconds: u32) -> Self {
        self.time_quantum = Some(seconds);
        self
    }

    /// Build and validate the model.
    pub fn build(self) -> Result<Model> {
        let model = Model {
            context: self.context,
            output: self.output,
            time_quantum: self.time_quantum,
        };
        model.validate()?;
        Ok(model)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// Value of a single context property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Continuous, time-of-day and day-of-week values.
    Number(f64),
    /// Enum and timezone values.
    Text(String),
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

/// Property values keyed by name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// One timestamped context update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextOperation {
    /// Unix timestamp, in seconds.
    pub timestamp: i64,
    /// Property values that changed at this timestamp.
    pub context: Properties,
}

impl ContextOperation {
    /// Create an empty operation at a timestamp.
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            context: Properties::new(),
        }
    }

    /// Add a property value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.context.insert(name.into(), value.into());
        self
    }
}

/// Context of an agent at a given time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextState {
    /// Timestamp the state was computed at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Property values.
    #[serde(default)]
    pub context: Properties,
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create an agent.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateAgentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub model: &'a Model,
}

/// An agent as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier.
    pub id: String,
    /// Model the agent learns from.
    pub model: Model,
    /// Timestamp of the first context operation.
    #[serde(
        default,
        rename = "firstTimestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_timestamp: Option<i64>,
    /// Timestamp of the last context operation.
    #[serde(
        default,
        rename = "lastTimestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_timestamp: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Decisions
// ─────────────────────────────────────────────────────────────────────────────

/// Decision tree computed by the service.
///
/// The document is kept as-is; the client never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTree(pub serde_json::Value);

impl DecisionTree {
    /// Format version of the tree, if reported.
    pub fn version(&self) -> Option<&str> {
        self.0.get("_version").and_then(|v| v.as_str())
    }

    /// The `trees` member, one tree per output.
    pub fn trees(&self) -> Option<&serde_json::Value> {
        self.0.get("trees")
    }

    /// The raw document.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Request for a decision.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DecideRequest<'a> {
    pub timestamp: i64,
    pub context: &'a Properties,
}

/// Predicted value for one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutput {
    /// Predicted value.
    pub predicted_value: PropertyValue,
    /// Confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Decision returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Timestamp the decision was taken at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Context the decision was taken for.
    #[serde(default)]
    pub context: Properties,
    /// Predictions keyed by output name.
    pub output: BTreeMap<String, DecisionOutput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thermostat() -> Model {
        Model::builder()
            .property("externalTemp", PropertyType::Continuous)
            .generated("time", PropertyType::TimeOfDay)
            .property("internalTemp", PropertyType::Enum)
            .output("internalTemp")
            .time_quantum(60)
            .build()
            .unwrap()
    }

    #[test]
    fn test_model_wire_format() {
        let value = serde_json::to_value(thermostat()).unwrap();
        assert_eq!(
            value,
            json!({
                "context": {
                    "externalTemp": {"type": "continuous"},
                    "internalTemp": {"type": "enum"},
                    "time": {"type": "time_of_day", "is_generated": true}
                },
                "output": ["internalTemp"],
                "time_quantum": 60
            })
        );
    }

    #[test]
    fn test_create_request_omits_missing_id() {
        let model = thermostat();
        let body = serde_json::to_value(CreateAgentRequest {
            id: None,
            model: &model,
        })
        .unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("model").is_some());

        let body = serde_json::to_value(CreateAgentRequest {
            id: Some("client_c_test_agent"),
            model: &model,
        })
        .unwrap();
        assert_eq!(body["id"], "client_c_test_agent");
    }

    #[test]
    fn test_model_requires_output() {
        let err = Model::builder()
            .property("temp", PropertyType::Continuous)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_model_output_must_be_declared() {
        let err = Model::builder()
            .property("temp", PropertyType::Continuous)
            .output("light")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("light"));
    }

    #[test]
    fn test_model_property_limit() {
        let mut builder = Model::builder();
        for i in 0..=MAX_PROPERTIES {
            builder = builder.property(format!("p{}", i), PropertyType::Continuous);
        }
        let err = builder.output("p0").build().unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_model_rejects_zero_quantum() {
        let err = Model::builder()
            .property("temp", PropertyType::Continuous)
            .output("temp")
            .time_quantum(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_property_value_untagged() {
        let op: ContextOperation = serde_json::from_value(json!({
            "timestamp": 1469410200,
            "context": {"tz": "+02:00", "temp": 20.5}
        }))
        .unwrap();
        assert_eq!(op.context["tz"], PropertyValue::Text("+02:00".into()));
        assert_eq!(op.context["temp"], PropertyValue::Number(20.5));
        assert_eq!(op.context["temp"].to_string(), "20.5");
    }

    #[test]
    fn test_agent_timestamps_optional() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "thermostat",
            "model": {"context": {"t": {"type": "continuous"}}, "output": ["t"]},
            "firstTimestamp": 1,
            "lastTimestamp": 9
        }))
        .unwrap();
        assert_eq!(agent.first_timestamp, Some(1));
        assert_eq!(agent.last_timestamp, Some(9));

        let agent: Agent = serde_json::from_value(json!({
            "id": "thermostat",
            "model": {"context": {"t": {"type": "continuous"}}, "output": ["t"]}
        }))
        .unwrap();
        assert_eq!(agent.first_timestamp, None);
        assert_eq!(agent.model.time_quantum, None);
    }

    #[test]
    fn test_decision_tree_accessors() {
        let tree = DecisionTree(json!({"_version": "1.0.0", "trees": {"light": {}}}));
        assert_eq!(tree.version(), Some("1.0.0"));
        assert!(tree.trees().is_some());

        let tree = DecisionTree(json!({}));
        assert_eq!(tree.version(), None);
    }

    #[test]
    fn test_agent_id_validation() {
        assert!(validate_agent_id("client_c_test_agent").is_ok());
        assert!(validate_agent_id("a-1").is_ok());
        assert!(validate_agent_id("").is_err());
        assert!(validate_agent_id("has space").is_err());
        assert!(validate_agent_id("../escape").is_err());
        assert!(validate_agent_id(&"x".repeat(MAX_ID_SIZE)).is_ok());
        assert!(validate_agent_id(&"x".repeat(MAX_ID_SIZE + 1)).is_err());
    }

    #[test]
    fn test_fill_generated() {
        let model = Model::builder()
            .property("temp", PropertyType::Continuous)
            .generated("time", PropertyType::TimeOfDay)
            .generated("day", PropertyType::DayOfWeek)
            .generated("tz", PropertyType::Timezone)
            .property("manual_tz", PropertyType::Timezone)
            .output("temp")
            .build()
            .unwrap();

        // 2016-07-25T01:30:00Z is a Monday; 03:30 at +02:00.
        let time = Time::new(1469410200, Some("+02:00")).unwrap();
        let mut context = Properties::new();
        context.insert("temp".into(), 21.0.into());
        model.fill_generated(&mut context, &time);

        assert_eq!(context["temp"], PropertyValue::Number(21.0));
        assert_eq!(context["time"], PropertyValue::Number(3.5));
        assert_eq!(context["day"], PropertyValue::Number(0.0));
        assert_eq!(context["tz"], PropertyValue::Text("+02:00".into()));
        assert!(!context.contains_key("manual_tz"));
    }
}
