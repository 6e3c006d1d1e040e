use casa_shared::{SafetyError, SharedError};
use casa_store::StoreError;
use thiserror::Error;

/// Misuse of the appeal workflow: the two block affordances are only valid
/// while a draft is blocked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("No blocked draft to act on")]
    NotBlocked,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Message log error: {0}")]
    Store(#[from] StoreError),

    #[error("Safety filter error: {0}")]
    Safety(#[from] SafetyError),

    #[error("{0}")]
    Shared(#[from] SharedError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
