//! # Quillpress Infrastructure
//!
//! Concrete implementations of the ports defined in `quillpress-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod database;
pub mod store;

// Re-exports - In-Memory
pub use store::InMemoryPostStore;

// Re-exports - Postgres
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostStore};
