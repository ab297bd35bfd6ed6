use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SeedError;

/// Physical id reported on every response. It never changes, so the
/// provisioning engine never sees a replacement.
pub const PHYSICAL_RESOURCE_ID: &str = "OrdersConfigData";
pub const TABLE_NAME_PROPERTY: &str = "tableName";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for RequestType {
    type Err = SeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            other => Err(SeedError::UnrecognizedRequestType(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceProperties {
    #[serde(rename = "ServiceToken", skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(
        rename = "tableName",
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ResourceProperties {
    /// The target table as supplied, or `None` when absent, blank, or not a
    /// string.
    pub fn table_name(&self) -> Option<&str> {
        self.table_name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Custom resource event as delivered by the provider framework.
///
/// Every field defaults so that any JSON object decodes; the identifiers must
/// be echoed back even when the rest of the event is unusable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub request_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_properties: ResourceProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<ResourceProperties>,
    pub logical_resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    pub request_id: String,
    pub stack_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(rename = "ResponseURL", skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
}

impl LifecycleEvent {
    pub fn request_type(&self) -> Result<RequestType, SeedError> {
        self.request_type.parse()
    }

    /// Reads only the identifiers echoed in the response, tolerating any
    /// other shape. Used when the full event does not decode.
    pub fn identifiers_from(payload: &Value) -> Self {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            request_type: field("RequestType").unwrap_or_default(),
            logical_resource_id: field("LogicalResourceId").unwrap_or_default(),
            physical_resource_id: field("PhysicalResourceId"),
            request_id: field("RequestId").unwrap_or_default(),
            stack_id: field("StackId").unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub logical_resource_id: String,
    pub physical_resource_id: String,
    pub request_id: String,
    pub stack_id: String,
}

impl LifecycleResponse {
    pub fn success(event: &LifecycleEvent) -> Self {
        Self::from_event(event, ResponseStatus::Success, String::new())
    }

    pub fn failed(event: &LifecycleEvent, reason: impl Into<String>) -> Self {
        Self::from_event(event, ResponseStatus::Failed, reason.into())
    }

    fn from_event(event: &LifecycleEvent, status: ResponseStatus, reason: String) -> Self {
        Self {
            status,
            reason,
            logical_resource_id: event.logical_resource_id.clone(),
            physical_resource_id: PHYSICAL_RESOURCE_ID.to_string(),
            request_id: event.request_id.clone(),
            stack_id: event.stack_id.clone(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn decode_event(payload: Value) -> Result<LifecycleEvent, SeedError> {
    if !payload.is_object() {
        return Err(SeedError::MalformedEvent(
            "payload must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(payload).map_err(|error| SeedError::MalformedEvent(error.to_string()))
}
