//! Error types for the stats indexer application.
//! Consolidates errors from the pipeline and the persistence layers behind a
//! single top-level type.
#[derive(Debug, thiserror::Error)]
pub enum IndexingError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] stats_indexer_pipeline::errors::PipelineError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] stats_indexer_pipeline::errors::LedgerError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Series repository error: {0}")]
    Series(#[from] stats_indexer_repository::SeriesRepositoryError),
    #[error("Checkpoint repository error: {0}")]
    Checkpoint(#[from] stats_indexer_repository::CheckpointRepositoryError),
    #[error("Configuration error: {0}")]
    Config(String),
}
