//! # meetral-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `meetral-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows, coercing malformed rows
//!   instead of failing the whole query
//!
//! ## Dependency rule
//! Depends on `meetral-app` (for port traits) and `meetral-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod error;
pub mod event_repo;
pub mod favorites_repo;
pub mod pool;

pub use error::StorageError;
pub use event_repo::SqliteEventRepository;
pub use favorites_repo::SqliteFavoritesRepository;
pub use pool::{Config, Database};
