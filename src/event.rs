//! Provisioning event model.
//!
//! Mirrors the wire shape delivered by the declarative-infrastructure engine:
//! PascalCase field names, a request type of Create/Delete/Update, and a tag
//! list whose entries may be blank or null. Unknown envelope fields are
//! ignored so the full engine payload deserializes into this partial view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProvisionError;

/// Lifecycle signal carried by a provisioning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Delete,
    Update,
}

/// Resource properties describing the desired replicated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    pub table_name: String,
    /// Region in which the table was first created. Replica topology is
    /// always mutated through this region's table.
    pub original_primary_region: String,
    /// Raw `key=value` tag strings; entries may be blank or null.
    #[serde(default)]
    pub tags: Vec<Option<String>>,
}

/// One invocation's immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningEvent {
    pub request_type: RequestType,
    pub resource_properties: ResourceProperties,
}

impl ProvisioningEvent {
    /// Deserialize an event from the engine's raw JSON payload.
    pub fn from_json(data: &[u8]) -> Result<Self, ProvisionError> {
        serde_json::from_slice(data).map_err(|err| ProvisionError::Serialization {
            message: err.to_string(),
        })
    }
}

/// Opaque invocation metadata handed through to the response transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationContext {
    pub request_id: Option<String>,
    pub log_stream_name: Option<String>,
}

/// ARNs produced by a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Outputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_stream_arn: Option<String>,
}

impl Outputs {
    pub fn is_empty(&self) -> bool {
        self.table_arn.is_none() && self.table_stream_arn.is_none()
    }
}

/// Terminal status reported back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "SUCCESS",
            ResponseStatus::Failed => "FAILED",
        }
    }
}

/// Response transport owned by the embedding runtime.
///
/// The processor calls this exactly once per invocation, with either status.
#[async_trait]
pub trait ProvisionResponder: Send + Sync {
    async fn respond(
        &self,
        event: &ProvisioningEvent,
        context: &InvocationContext,
        status: ResponseStatus,
        outputs: &Outputs,
    ) -> Result<(), ProvisionError>;
}
