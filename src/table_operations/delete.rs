//! Local-table deletion.

use tracing::info;

use crate::client::ReplicaTableStore;
use crate::config::PollSettings;
use crate::errors::ProvisionError;
use crate::table_operations::wait_for_table_active;

/// Wait for the local table to become active, then delete it.
///
/// Deleting a non-active table is rejected by the service, hence the wait.
/// Faults propagate; the coordinator decides what deletion failure means.
pub async fn delete_local_table<S>(
    store: &S,
    table: &str,
    poll: &PollSettings,
) -> Result<(), ProvisionError>
where
    S: ReplicaTableStore + ?Sized,
{
    wait_for_table_active(store, table, poll).await?;
    store.delete_table(table).await?;
    info!(table, region = store.region(), "table deleted");
    Ok(())
}
