// Domain Layer - Pure business logic and entities

pub mod error;
pub mod field_map;
pub mod job;
pub mod notification;

// Re-exports
pub use error::DomainError;
pub use field_map::{FieldKind, FieldMap};
pub use job::{ExternalId, Job, JobFields, JobId, JobSummary, Version};
pub use notification::{MessageSettings, Operation, QueueMessage};
