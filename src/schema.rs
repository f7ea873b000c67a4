//! Table schema template and per-event materialization.
//!
//! The template is owned by the processor for its whole lifetime; each create
//! operation materializes its own `TableSpec` with the event's table name and
//! parsed tags. SDK types appear only at the client boundary.

use serde::{Deserialize, Serialize};

use crate::errors::ProvisionError;

/// A resource tag, parsed from a `key=value` event string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Scalar type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Number,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: ScalarType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Hash,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub name: String,
    pub role: KeyRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
    Provisioned {
        read_capacity: i64,
        write_capacity: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamView {
    KeysOnly,
    NewImage,
    OldImage,
    NewAndOldImages,
}

/// Change-stream configuration. `None` on a `TableSpec` disables streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    pub view: StreamView,
}

/// Fully materialized description of the table to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table_name: String,
    pub attributes: Vec<AttributeSpec>,
    pub key_schema: Vec<KeySpec>,
    pub billing_mode: BillingMode,
    pub stream: Option<StreamSpec>,
    pub tags: Vec<Tag>,
}

/// Schema shape shared by every table this handler creates.
///
/// The default mirrors a single-attribute configuration table: one string
/// attribute `key` as the hash key, on-demand billing, and a change stream
/// carrying both old and new images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTemplate {
    pub attributes: Vec<AttributeSpec>,
    pub key_schema: Vec<KeySpec>,
    pub billing_mode: BillingMode,
    pub stream: Option<StreamSpec>,
}

impl Default for SchemaTemplate {
    fn default() -> Self {
        SchemaTemplate {
            attributes: vec![AttributeSpec {
                name: "key".to_string(),
                kind: ScalarType::String,
            }],
            key_schema: vec![KeySpec {
                name: "key".to_string(),
                role: KeyRole::Hash,
            }],
            billing_mode: BillingMode::PayPerRequest,
            stream: Some(StreamSpec {
                view: StreamView::NewAndOldImages,
            }),
        }
    }
}

impl SchemaTemplate {
    /// Produce the `TableSpec` for one create operation. The template is not mutated.
    pub fn materialize(&self, table_name: &str, tags: Vec<Tag>) -> TableSpec {
        TableSpec {
            table_name: table_name.to_string(),
            attributes: self.attributes.clone(),
            key_schema: self.key_schema.clone(),
            billing_mode: self.billing_mode,
            stream: self.stream,
            tags,
        }
    }
}

/// Parse raw `key=value` tag strings from the event.
///
/// Blank and null entries are dropped. Each remaining entry is split on the
/// first `=` with both sides trimmed. An entry with no `=` is a validation
/// fault rather than a silent skip.
pub fn parse_tags(raw: &[Option<String>]) -> Result<Vec<Tag>, ProvisionError> {
    let mut tags = Vec::new();
    for entry in raw {
        let Some(entry) = entry else { continue };
        if entry.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ProvisionError::Validation {
                message: format!("tag '{}' is not of the form key=value", entry),
            });
        };
        tags.push(Tag {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        });
    }
    Ok(tags)
}
