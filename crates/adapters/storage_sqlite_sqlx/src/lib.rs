//! # sensorhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `ReadingStore` port trait defined in `sensorhub-app`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Every filter value is bound as a query parameter — client-supplied text
//! is never spliced into SQL.
//!
//! ## Dependency rule
//! Depends on `sensorhub-app` (for the port trait) and `sensorhub-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;
pub mod pool;
pub mod reading_store;

pub use pool::{Config, Database};
pub use reading_store::SqliteReadingStore;
