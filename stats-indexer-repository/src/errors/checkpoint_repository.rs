use thiserror::Error;

#[derive(Debug, Error)]
/// Represents errors that can occur within the checkpoint repository.
pub enum CheckpointRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
