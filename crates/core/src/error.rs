use crate::blocks::BlockViolation;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The block list breaks one or more structural rules. Every violation
    /// is listed, not just the first one found.
    #[error("Invalid content: {}", join_violations(.0))]
    InvalidContent(Vec<BlockViolation>),

    #[error("Invalid scheduling: {0}")]
    InvalidScheduling(String),

    #[error("Invalid author: no user with id {0}")]
    InvalidAuthor(DbId),

    #[error("Name must not be empty")]
    EmptyName,

    /// The page changed under a write that was checked against an older
    /// read of it.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The persistence layer failed; nothing from the operation was committed.
    #[error("Storage fault: {0}")]
    StorageFault(String),
}

fn join_violations(violations: &[BlockViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
