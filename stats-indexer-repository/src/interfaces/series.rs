//! This module defines the `SeriesRepository` trait, which provides an
//! interface for interacting with the underlying data store for daily
//! records. It abstracts the database operations for persistence and
//! retrieval.
use crate::errors::SeriesRepositoryError;
use chrono::NaiveDate;
use stats_indexer_shared::types::{DailyRecord, EventKind};

/// A trait that defines the interface for interacting with the daily series
/// data repository.
///
/// Records are addressed by their natural key `(kind, pool_id, date)`;
/// `upsert_records` must overwrite on key collision so replaying an
/// already-processed window is idempotent.
#[async_trait::async_trait]
pub trait SeriesRepository: Send + Sync {
    /// Merge-upserts a batch of daily records by natural key.
    ///
    /// # Arguments
    ///
    /// * `records` - Records to persist; each upsert is atomic per record.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or a `SeriesRepositoryError` if
    /// persistence fails.
    async fn upsert_records(&self, records: &[DailyRecord]) -> Result<(), SeriesRepositoryError>;

    /// Returns the newest record of a series across all pools, if any.
    async fn latest_record(
        &self,
        kind: EventKind,
    ) -> Result<Option<DailyRecord>, SeriesRepositoryError>;

    /// Returns the newest record for one `(kind, pool)` series strictly
    /// before `date`, used as the aggregation baseline for a window starting
    /// at `date`.
    async fn latest_record_before(
        &self,
        kind: EventKind,
        pool_id: Option<u64>,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, SeriesRepositoryError>;

    /// Returns records of a series with `from_date <= date <= to_date`,
    /// ordered by date then pool.
    async fn records_in_range(
        &self,
        kind: EventKind,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<DailyRecord>, SeriesRepositoryError>;
}
