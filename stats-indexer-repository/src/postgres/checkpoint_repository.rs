//! PostgreSQL implementation of the checkpoint repository.
//!
//! Stores per-kind checkpoints in a `checkpoints` table to enable pipeline
//! resumption after restarts.

use crate::CheckpointRepository;
use crate::errors::CheckpointRepositoryError;
use async_trait::async_trait;
use sqlx::Row;
use stats_indexer_shared::types::{Checkpoint, EventKind};

/// PostgreSQL-backed checkpoint repository.
///
/// Persists checkpoints with upsert operations for atomic updates.
pub struct PostgresCheckpointRepository {
    pool: sqlx::PgPool,
}

impl PostgresCheckpointRepository {
    /// Creates a new PostgreSQL checkpoint repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresCheckpointRepository)` - Ready-to-use repository instance
    /// * `Err(CheckpointRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, CheckpointRepositoryError> {
        Ok(Self { pool })
    }
}

#[async_trait]
impl CheckpointRepository for PostgresCheckpointRepository {
    async fn get_checkpoint(
        &self,
        kind: EventKind,
    ) -> Result<Option<Checkpoint>, CheckpointRepositoryError> {
        let row = sqlx::query("SELECT last_processed_block FROM checkpoints WHERE series = $1")
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| {
            let block: i64 = row.get("last_processed_block");
            Checkpoint {
                kind,
                last_processed_block: block as u64,
            }
        }))
    }

    async fn set_checkpoint(
        &self,
        checkpoint: &Checkpoint,
    ) -> Result<(), CheckpointRepositoryError> {
        sqlx::query(
            "INSERT INTO checkpoints (series, last_processed_block) VALUES ($1, $2) \
             ON CONFLICT (series) DO UPDATE SET last_processed_block = $2",
        )
        .bind(checkpoint.kind.as_str())
        .bind(checkpoint.last_processed_block as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
