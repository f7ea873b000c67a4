//! Replica tagging.

use tracing::info;

use crate::client::ReplicaTableStore;
use crate::errors::ProvisionError;
use crate::schema::Tag;

/// Apply `tags` to the table at `arn`.
///
/// Tag metadata does not travel with replication, so a newly materialized
/// replica must be tagged in its own region.
pub async fn tag_table<S>(store: &S, arn: &str, tags: &[Tag]) -> Result<(), ProvisionError>
where
    S: ReplicaTableStore + ?Sized,
{
    info!(
        arn,
        region = store.region(),
        count = tags.len(),
        "tagging table"
    );
    store.tag_resource(arn, tags).await
}
