//! Create/delete decision logic for one provisioning event.

use tracing::{info, warn};

use crate::client::ReplicaTableStore;
use crate::config::HandlerConfig;
use crate::errors::ProvisionError;
use crate::event::{Outputs, ResourceProperties};
use crate::schema::{SchemaTemplate, parse_tags};
use crate::table_operations::{
    add_replica_and_wait, delete_local_table, ensure_primary_table, tag_table,
    wait_for_table_active,
};

/// Per-invocation coordinator over an origin-region and a local-region store.
///
/// When the invocation runs in the origin region both fields borrow the same
/// store. Holds no state of its own beyond the borrows; a retried event
/// re-derives everything from remote state.
pub struct ReplicaCoordinator<'a, S: ReplicaTableStore + ?Sized> {
    origin: &'a S,
    local: &'a S,
    config: &'a HandlerConfig,
    template: &'a SchemaTemplate,
}

impl<'a, S: ReplicaTableStore + ?Sized> ReplicaCoordinator<'a, S> {
    pub fn new(
        origin: &'a S,
        local: &'a S,
        config: &'a HandlerConfig,
        template: &'a SchemaTemplate,
    ) -> Self {
        ReplicaCoordinator {
            origin,
            local,
            config,
            template,
        }
    }

    /// Bring the table into existence in this region.
    ///
    /// The origin-region table is guaranteed first in every case: replicas
    /// are carved out of it, and it cannot be deleted while any replica
    /// remains registered. In the origin region that guarantee is the whole
    /// job; in a secondary region the origin's replica set decides whether a
    /// replica-create is still needed, which makes a retried event converge
    /// without double-creating.
    pub async fn process_create(
        &self,
        properties: &ResourceProperties,
    ) -> Result<Outputs, ProvisionError> {
        let tags = parse_tags(&properties.tags)?;
        let spec = self.template.materialize(&properties.table_name, tags);

        let origin_description =
            ensure_primary_table(self.origin, &spec, &self.config.poll).await?;

        if self.config.region == properties.original_primary_region {
            return Ok(Outputs {
                table_arn: origin_description.table_arn,
                table_stream_arn: origin_description.latest_stream_arn,
            });
        }

        if origin_description.has_replica_in(&self.config.region) {
            info!(
                table = %properties.table_name,
                region = %self.config.region,
                "replica already registered, skipping create"
            );
        } else {
            add_replica_and_wait(
                self.origin,
                &properties.table_name,
                &self.config.region,
                &self.config.poll,
            )
            .await?;
        }

        let local_description =
            wait_for_table_active(self.local, &properties.table_name, &self.config.poll).await?;

        // Tags do not travel with replication; reapply them here.
        let arn = local_description
            .table_arn
            .clone()
            .ok_or_else(|| ProvisionError::Unexpected {
                message: format!("replica '{}' has no ARN", properties.table_name),
            })?;
        tag_table(self.local, &arn, &spec.tags).await?;

        Ok(Outputs {
            table_arn: local_description.table_arn,
            table_stream_arn: local_description.latest_stream_arn,
        })
    }

    /// Remove the local table, reporting success regardless of outcome.
    ///
    /// A fault here usually means the table is already gone, or this is the
    /// origin table still holding replicas (the engine deletes secondaries
    /// first, so a later retry on the origin succeeds). Both read as
    /// "nothing to do" to the engine; anything else is logged at warn so a
    /// genuine failure is still visible in telemetry.
    pub async fn process_delete(&self, properties: &ResourceProperties) -> Outputs {
        match delete_local_table(self.local, &properties.table_name, &self.config.poll).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                info!(
                    table = %properties.table_name,
                    region = %self.config.region,
                    "table already absent"
                );
            }
            Err(err) => {
                warn!(
                    table = %properties.table_name,
                    region = %self.config.region,
                    error = %err,
                    "delete failed, treating table as converged"
                );
            }
        }
        Outputs::default()
    }
}
