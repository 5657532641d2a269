// Jobs Infrastructure - SQLite Adapter
// Implements: JobRepository, TransactionalJobRepository

mod connection;
mod job_repository;
mod migration;
mod row;
mod transaction;

pub use connection::create_pool;
pub use job_repository::SqliteJobRepository;
pub use migration::{current_schema_version, run_migrations};
pub use transaction::SqliteJobTransaction;

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
