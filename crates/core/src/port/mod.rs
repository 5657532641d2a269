// Port Layer - Interfaces for external dependencies

pub mod change_notifier;
pub mod id_provider; // For deterministic testing
pub mod job_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use change_notifier::{ChangeNotifier, NoopNotifier};
pub use id_provider::IdProvider;
pub use job_repository::JobRepository;
pub use time_provider::TimeProvider;
pub use transaction::{JobRepositoryTransaction, Transaction, TransactionalJobRepository};
