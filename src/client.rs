//! Per-region DynamoDB handles.
//!
//! `ReplicaTableStore` is the capability surface the coordinator consumes:
//! describe, create, replica-create, delete, and tag against a single
//! region's table service. `RegionClient` is the production implementation
//! over the AWS SDK; clients are built once per invocation from a shared
//! `SdkConfig` with a per-region override, and reused across polling
//! iterations.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as SdkBillingMode, CreateReplicationGroupMemberAction,
    KeySchemaElement, KeyType, ProvisionedThroughput, ReplicationGroupUpdate, ScalarAttributeType,
    StreamSpecification, StreamViewType, TableStatus as SdkTableStatus, Tag as SdkTag,
};

use crate::errors::{ProvisionError, map_sdk_error};
use crate::schema::{BillingMode, KeyRole, ScalarType, StreamView, TableSpec, Tag};

/// Operational status of a table in one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Creating,
    Updating,
    Deleting,
    Active,
    InaccessibleEncryptionCredentials,
    Archiving,
    Archived,
    Unknown(String),
}

impl TableStatus {
    /// The terminal ready state: fully provisioned and serving traffic.
    pub fn is_active(&self) -> bool {
        matches!(self, TableStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
            TableStatus::Active => "ACTIVE",
            TableStatus::InaccessibleEncryptionCredentials => {
                "INACCESSIBLE_ENCRYPTION_CREDENTIALS"
            }
            TableStatus::Archiving => "ARCHIVING",
            TableStatus::Archived => "ARCHIVED",
            TableStatus::Unknown(other) => other,
        }
    }

    fn from_sdk(status: &SdkTableStatus) -> Self {
        match status {
            SdkTableStatus::Creating => TableStatus::Creating,
            SdkTableStatus::Updating => TableStatus::Updating,
            SdkTableStatus::Deleting => TableStatus::Deleting,
            SdkTableStatus::Active => TableStatus::Active,
            SdkTableStatus::InaccessibleEncryptionCredentials => {
                TableStatus::InaccessibleEncryptionCredentials
            }
            SdkTableStatus::Archiving => TableStatus::Archiving,
            SdkTableStatus::Archived => TableStatus::Archived,
            other => TableStatus::Unknown(other.as_str().to_string()),
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a table, valid for one poll step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    pub status: TableStatus,
    pub table_arn: Option<String>,
    pub latest_stream_arn: Option<String>,
    /// Regions currently registered as replicas of this table.
    pub replica_regions: Vec<String>,
}

impl TableDescription {
    pub fn has_replica_in(&self, region: &str) -> bool {
        self.replica_regions.iter().any(|r| r == region)
    }
}

/// Capability surface of one region's replicated-table service.
#[async_trait]
pub trait ReplicaTableStore: Send + Sync {
    /// Region this store is bound to.
    fn region(&self) -> &str;

    async fn describe_table(&self, table: &str) -> Result<TableDescription, ProvisionError>;

    async fn create_table(&self, spec: &TableSpec) -> Result<(), ProvisionError>;

    /// Register a replica of `table` in `replica_region`. Must be issued
    /// against the table's origin region; the replica materializes
    /// asynchronously and is reported through the origin table's own status.
    async fn create_replica(&self, table: &str, replica_region: &str)
    -> Result<(), ProvisionError>;

    async fn delete_table(&self, table: &str) -> Result<(), ProvisionError>;

    async fn tag_resource(&self, arn: &str, tags: &[Tag]) -> Result<(), ProvisionError>;
}

/// Production store backed by the AWS SDK DynamoDB client.
#[derive(Clone)]
pub struct RegionClient {
    client: Client,
    region: String,
}

impl std::fmt::Debug for RegionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionClient")
            .field("region", &self.region)
            .finish()
    }
}

impl RegionClient {
    /// Load the shared AWS config for an invocation.
    ///
    /// Region priority: argument > environment > us-east-1 default.
    pub async fn load_base_config(region: Option<String>) -> aws_config::SdkConfig {
        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else("us-east-1");
        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }

    /// Build a client bound to `region`, inheriting everything else
    /// (credentials, HTTP client, retry config) from the shared config.
    pub fn new(
        sdk_config: &aws_config::SdkConfig,
        region: impl Into<String>,
        endpoint_url: Option<&str>,
    ) -> Self {
        let region = region.into();
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .region(Region::new(region.clone()));
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }
        RegionClient {
            client: Client::from_conf(builder.build()),
            region,
        }
    }

    /// Wrap a pre-built client (for localstack-style testing).
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        RegionClient {
            client,
            region: region.into(),
        }
    }
}

fn scalar_to_sdk(kind: ScalarType) -> ScalarAttributeType {
    match kind {
        ScalarType::String => ScalarAttributeType::S,
        ScalarType::Number => ScalarAttributeType::N,
        ScalarType::Binary => ScalarAttributeType::B,
    }
}

fn key_role_to_sdk(role: KeyRole) -> KeyType {
    match role {
        KeyRole::Hash => KeyType::Hash,
        KeyRole::Range => KeyType::Range,
    }
}

fn stream_view_to_sdk(view: StreamView) -> StreamViewType {
    match view {
        StreamView::KeysOnly => StreamViewType::KeysOnly,
        StreamView::NewImage => StreamViewType::NewImage,
        StreamView::OldImage => StreamViewType::OldImage,
        StreamView::NewAndOldImages => StreamViewType::NewAndOldImages,
    }
}

fn tags_to_sdk(tags: &[Tag]) -> Result<Vec<SdkTag>, ProvisionError> {
    let mut sdk_tags = Vec::with_capacity(tags.len());
    for tag in tags {
        sdk_tags.push(SdkTag::builder().key(&tag.key).value(&tag.value).build()?);
    }
    Ok(sdk_tags)
}

#[async_trait]
impl ReplicaTableStore for RegionClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_table(&self, table: &str) -> Result<TableDescription, ProvisionError> {
        let output = self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, table, &self.region))?;

        let Some(description) = output.table() else {
            return Err(ProvisionError::Unexpected {
                message: format!("describe of '{}' returned no table description", table),
            });
        };

        Ok(TableDescription {
            status: description
                .table_status()
                .map(TableStatus::from_sdk)
                .unwrap_or_else(|| TableStatus::Unknown("UNKNOWN".to_string())),
            table_arn: description.table_arn().map(str::to_string),
            latest_stream_arn: description.latest_stream_arn().map(str::to_string),
            replica_regions: description
                .replicas()
                .iter()
                .filter_map(|r| r.region_name().map(str::to_string))
                .collect(),
        })
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<(), ProvisionError> {
        let mut attributes = Vec::with_capacity(spec.attributes.len());
        for attribute in &spec.attributes {
            attributes.push(
                AttributeDefinition::builder()
                    .attribute_name(&attribute.name)
                    .attribute_type(scalar_to_sdk(attribute.kind))
                    .build()?,
            );
        }

        let mut key_schema = Vec::with_capacity(spec.key_schema.len());
        for key in &spec.key_schema {
            key_schema.push(
                KeySchemaElement::builder()
                    .attribute_name(&key.name)
                    .key_type(key_role_to_sdk(key.role))
                    .build()?,
            );
        }

        let mut request = self
            .client
            .create_table()
            .table_name(&spec.table_name)
            .set_attribute_definitions(Some(attributes))
            .set_key_schema(Some(key_schema));

        request = match spec.billing_mode {
            BillingMode::PayPerRequest => request.billing_mode(SdkBillingMode::PayPerRequest),
            BillingMode::Provisioned {
                read_capacity,
                write_capacity,
            } => request
                .billing_mode(SdkBillingMode::Provisioned)
                .provisioned_throughput(
                    ProvisionedThroughput::builder()
                        .read_capacity_units(read_capacity)
                        .write_capacity_units(write_capacity)
                        .build()?,
                ),
        };

        if let Some(stream) = spec.stream {
            request = request.stream_specification(
                StreamSpecification::builder()
                    .stream_enabled(true)
                    .stream_view_type(stream_view_to_sdk(stream.view))
                    .build()?,
            );
        }

        if !spec.tags.is_empty() {
            request = request.set_tags(Some(tags_to_sdk(&spec.tags)?));
        }

        request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &spec.table_name, &self.region))?;
        Ok(())
    }

    async fn create_replica(
        &self,
        table: &str,
        replica_region: &str,
    ) -> Result<(), ProvisionError> {
        let action = CreateReplicationGroupMemberAction::builder()
            .region_name(replica_region)
            .build()?;

        self.client
            .update_table()
            .table_name(table)
            .replica_updates(ReplicationGroupUpdate::builder().create(action).build())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, table, &self.region))?;
        Ok(())
    }

    async fn delete_table(&self, table: &str) -> Result<(), ProvisionError> {
        self.client
            .delete_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, table, &self.region))?;
        Ok(())
    }

    async fn tag_resource(&self, arn: &str, tags: &[Tag]) -> Result<(), ProvisionError> {
        self.client
            .tag_resource()
            .resource_arn(arn)
            .set_tags(Some(tags_to_sdk(tags)?))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, arn, &self.region))?;
        Ok(())
    }
}
