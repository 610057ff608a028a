//! Error types for the stats indexer repository.
//! Consolidates and re-exports error types related to series and checkpoint
//! repository operations.
mod checkpoint_repository;
mod series;

pub use checkpoint_repository::CheckpointRepositoryError;
pub use series::SeriesRepositoryError;
