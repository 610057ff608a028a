use crate::errors::CheckpointRepositoryError;
use stats_indexer_shared::types::{Checkpoint, EventKind};

/// Trait for interacting with the checkpoint repository.
///
/// This trait provides a clean abstraction over the underlying data store for
/// the stats indexer. It handles the retrieval and persistence of per-kind
/// resumption checkpoints.
#[async_trait::async_trait]
pub trait CheckpointRepository: Send + Sync {
    async fn get_checkpoint(
        &self,
        kind: EventKind,
    ) -> Result<Option<Checkpoint>, CheckpointRepositoryError>;
    async fn set_checkpoint(
        &self,
        checkpoint: &Checkpoint,
    ) -> Result<(), CheckpointRepositoryError>;
}
