//! Table lifecycle primitives.
//!
//! This module provides the per-table operations the coordinator composes:
//! - `wait` - Poll a table until it reaches the active state
//! - `create` - Ensure the origin-region table exists and is active
//! - `replica` - Register a replica through the origin table and wait
//! - `tag` - Re-apply tags on a freshly materialized replica
//! - `delete` - Wait for and delete the local table

mod create;
mod delete;
mod replica;
mod tag;
mod wait;

// Re-export public functions
pub use create::ensure_primary_table;
pub use delete::delete_local_table;
pub use replica::add_replica_and_wait;
pub use tag::tag_table;
pub use wait::wait_for_table_active;
