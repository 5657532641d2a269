// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid job fields: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
