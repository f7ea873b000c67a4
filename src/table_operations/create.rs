//! Origin-table existence guarantee.

use tracing::info;

use crate::client::{ReplicaTableStore, TableDescription};
use crate::config::PollSettings;
use crate::errors::ProvisionError;
use crate::schema::TableSpec;
use crate::table_operations::wait_for_table_active;

/// Ensure the origin-region table exists and is active.
///
/// Existence is checked by describing first; only a not-found fault triggers
/// a create, after which the table is waited on again. This is the sole
/// create-vs-exists branch for the origin table; every other fault
/// propagates untouched.
pub async fn ensure_primary_table<S>(
    store: &S,
    spec: &TableSpec,
    poll: &PollSettings,
) -> Result<TableDescription, ProvisionError>
where
    S: ReplicaTableStore + ?Sized,
{
    match wait_for_table_active(store, &spec.table_name, poll).await {
        Ok(description) => Ok(description),
        Err(err) if err.is_not_found() => {
            info!(
                table = %spec.table_name,
                region = store.region(),
                "table absent in origin region, creating"
            );
            store.create_table(spec).await?;
            wait_for_table_active(store, &spec.table_name, poll).await
        }
        Err(err) => Err(err),
    }
}
