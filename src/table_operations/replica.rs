//! Replica registration.

use tracing::info;

use crate::client::{ReplicaTableStore, TableDescription};
use crate::config::PollSettings;
use crate::errors::ProvisionError;

/// Register a replica of `table` in `replica_region` and wait for the origin
/// table to return to active.
///
/// Replica topology is mutated through the origin table; the new replica's
/// provisioning is asynchronous and reported through the origin table's own
/// status, so the wait here targets the origin store.
pub async fn add_replica_and_wait<S>(
    origin: &S,
    table: &str,
    replica_region: &str,
    poll: &PollSettings,
) -> Result<TableDescription, ProvisionError>
where
    S: ReplicaTableStore + ?Sized,
{
    info!(
        table,
        replica_region,
        origin_region = origin.region(),
        "registering replica"
    );
    origin.create_replica(table, replica_region).await?;
    crate::table_operations::wait_for_table_active(origin, table, poll).await
}
