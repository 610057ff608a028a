//! Error types for the pipeline orchestrator.
//! These are fatal for the run of one event kind: without the ledger head or
//! the checkpoint store, progress cannot be tracked safely.
use crate::errors::{BlockTimeError, LedgerError};
use stats_indexer_repository::{CheckpointRepositoryError, SeriesRepositoryError};
use thiserror::Error;

/// Represents errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("block time lookup failed: {0}")]
    BlockTime(#[from] BlockTimeError),
    #[error("series repository error: {0}")]
    Series(#[from] SeriesRepositoryError),
    #[error("checkpoint repository error: {0}")]
    Checkpoint(#[from] CheckpointRepositoryError),
}
