use thiserror::Error;

/// Represents errors that can occur within the series repository.
///
/// This enum consolidates various error conditions specific to database
/// interactions, such as SQLx errors during database operations.
#[derive(Debug, Error)]
pub enum SeriesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
