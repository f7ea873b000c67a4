//! Provisioning-event handler for multi-region replicated DynamoDB tables.
//!
//! Reconciles a global table against create/delete lifecycle signals from a
//! declarative-infrastructure engine. The origin-region table is always
//! guaranteed first; secondary regions then register themselves as replicas
//! through the origin table, wait for their local copy to become active, and
//! re-apply tags that replication does not carry over. Every step checks
//! remote state before acting, so redelivery of the same event converges
//! instead of double-creating.
//!
//! Module map:
//! - [`event`] - Wire model of the provisioning event and the response contract
//! - [`schema`] - Table schema template and tag parsing
//! - [`client`] - Per-region store trait and the AWS SDK implementation
//! - [`table_operations`] - Poll/ensure/replica/tag/delete primitives
//! - [`lifecycle`] - Create-path and delete-path decision logic
//! - [`handler`] - Entry point: store resolution, dispatch, failure boundary
//! - [`retry`] - Bounded retry helper for store-level transient faults
//!
//! ```no_run
//! use global_table_provisioner::{
//!     EventProcessor, HandlerConfig, InvocationContext, ProvisioningEvent,
//! };
//!
//! # async fn run(
//! #     responder: &impl global_table_provisioner::ProvisionResponder,
//! # ) -> Result<(), global_table_provisioner::ProvisionError> {
//! let event = ProvisioningEvent::from_json(
//!     br#"{
//!         "RequestType": "Create",
//!         "ResourceProperties": {
//!             "TableName": "config",
//!             "OriginalPrimaryRegion": "us-east-1",
//!             "Tags": ["env=prod"]
//!         }
//!     }"#,
//! )?;
//!
//! let config = HandlerConfig::from_env();
//! global_table_provisioner::init_tracing(config.verbose);
//!
//! let processor = EventProcessor::new(config);
//! processor
//!     .process(&event, &InvocationContext::default(), responder)
//!     .await
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod event;
pub mod handler;
pub mod lifecycle;
pub mod retry;
pub mod schema;
pub mod table_operations;

pub use client::{RegionClient, ReplicaTableStore, TableDescription, TableStatus};
pub use config::{HandlerConfig, PollSettings, init_tracing};
pub use errors::ProvisionError;
pub use event::{
    InvocationContext, Outputs, ProvisionResponder, ProvisioningEvent, RequestType,
    ResourceProperties, ResponseStatus,
};
pub use handler::EventProcessor;
pub use lifecycle::ReplicaCoordinator;
pub use retry::retry;
pub use schema::{SchemaTemplate, TableSpec, Tag, parse_tags};
