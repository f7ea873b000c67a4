//! Active-state poller behavior under scripted describe sequences.

mod common;

use std::time::Duration;

use common::{Call, ScriptedStore, active, creating, journal, not_found};
use global_table_provisioner::table_operations::wait_for_table_active;
use global_table_provisioner::{PollSettings, ProvisionError, TableStatus};
use tokio::time::Instant;

fn poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_secs(5),
        max_attempts: Some(180),
    }
}

fn describe_count(journal: &common::Journal) -> usize {
    common::entries(journal)
        .iter()
        .filter(|call| matches!(call, Call::Describe { .. }))
        .count()
}

#[tokio::test(start_paused = true)]
async fn returns_third_description_after_exactly_two_sleeps() {
    let journal = journal();
    let store = ScriptedStore::new("us-east-1", &journal);
    store.push_describe(Ok(creating()));
    store.push_describe(Ok(creating()));
    store.push_describe(Ok(active("arn:orders", "arn:orders/stream", &[])));

    let start = Instant::now();
    let description = wait_for_table_active(&store, "orders", &poll()).await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(10));
    assert_eq!(describe_count(&journal), 3);
    assert_eq!(description.status, TableStatus::Active);
    assert_eq!(description.table_arn.as_deref(), Some("arn:orders"));
}

#[tokio::test(start_paused = true)]
async fn not_found_propagates_without_sleeping() {
    let journal = journal();
    let store = ScriptedStore::new("us-east-1", &journal);
    store.push_describe(Err(not_found("orders", "us-east-1")));

    let start = Instant::now();
    let err = wait_for_table_active(&store, "orders", &poll()).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(describe_count(&journal), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_is_a_distinct_fault() {
    let journal = journal();
    let store = ScriptedStore::new("eu-west-1", &journal);
    for _ in 0..3 {
        store.push_describe(Ok(creating()));
    }

    let settings = PollSettings {
        interval: Duration::from_secs(5),
        max_attempts: Some(3),
    };
    let err = wait_for_table_active(&store, "orders", &settings).await.unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::NotActive { table, region, attempts }
            if table == "orders" && region == "eu-west-1" && attempts == 3
    ));
    assert_eq!(describe_count(&journal), 3);
}

#[tokio::test(start_paused = true)]
async fn unbounded_budget_keeps_polling() {
    let journal = journal();
    let store = ScriptedStore::new("us-east-1", &journal);
    for _ in 0..10 {
        store.push_describe(Ok(creating()));
    }
    store.push_describe(Ok(active("arn:orders", "arn:orders/stream", &[])));

    let settings = PollSettings {
        interval: Duration::from_secs(5),
        max_attempts: None,
    };
    let description = wait_for_table_active(&store, "orders", &settings).await.unwrap();

    assert!(description.status.is_active());
    assert_eq!(describe_count(&journal), 11);
}
