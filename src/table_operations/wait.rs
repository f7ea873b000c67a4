//! Active-state polling.

use tokio::time::sleep;
use tracing::info;

use crate::client::{ReplicaTableStore, TableDescription};
use crate::config::PollSettings;
use crate::errors::ProvisionError;

/// Poll `table` until it reports the active state.
///
/// Each iteration is one describe; a non-active status sleeps
/// `poll.interval` and tries again, up to `poll.max_attempts` describes
/// (`None` polls until the host cancels the invocation). A describe fault,
/// including not-found, propagates to the caller immediately; that is how
/// callers distinguish "table missing" from "table not yet ready".
///
/// Never returns a description whose status is not active.
pub async fn wait_for_table_active<S>(
    store: &S,
    table: &str,
    poll: &PollSettings,
) -> Result<TableDescription, ProvisionError>
where
    S: ReplicaTableStore + ?Sized,
{
    info!(
        table,
        region = store.region(),
        "waiting for table to become active"
    );

    let mut attempts = 0u32;
    loop {
        let description = store.describe_table(table).await?;
        if description.status.is_active() {
            return Ok(description);
        }

        attempts += 1;
        if let Some(max) = poll.max_attempts
            && attempts >= max
        {
            return Err(ProvisionError::NotActive {
                table: table.to_string(),
                region: store.region().to_string(),
                attempts,
            });
        }

        info!(
            table,
            status = %description.status,
            interval_secs = poll.interval.as_secs(),
            "table not active yet"
        );
        sleep(poll.interval).await;
    }
}
