//! PostgreSQL implementation of the daily series repository.
//!
//! Provides the `SeriesRepository` backend used for persisted reporting data
//! with connection pooling, transaction safety, and batch upserts.

use crate::errors::SeriesRepositoryError;
use crate::interfaces::SeriesRepository;
use crate::postgres::{decode_pool, encode_pool};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::BigDecimal;
use stats_indexer_shared::types::{DailyRecord, EventKind};

/// PostgreSQL implementation of the daily series repository.
///
/// Bulk upserts use `QueryBuilder` with `ON CONFLICT ... DO UPDATE` so
/// records are overwritten by natural key; reads use runtime-bound queries.
pub struct PostgresSeriesRepository {
    pool: sqlx::PgPool,
}

impl PostgresSeriesRepository {
    /// Creates a new PostgreSQL series repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresSeriesRepository)` - Ready-to-use repository instance
    /// * `Err(SeriesRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, SeriesRepositoryError> {
        Ok(Self { pool })
    }
}

fn record_from_row(kind: EventKind, row: &PgRow) -> DailyRecord {
    let pool_id: i64 = row.get("pool_id");
    let day_delta: BigDecimal = row.get("day_delta");
    let running_total: BigDecimal = row.get("running_total");
    let reference_block_timestamp: i64 = row.get("reference_block_timestamp");
    DailyRecord {
        kind,
        pool_id: decode_pool(pool_id),
        date: row.get("date"),
        day_delta,
        running_total,
        reference_block_timestamp: reference_block_timestamp as u64,
    }
}

#[async_trait]
impl SeriesRepository for PostgresSeriesRepository {
    async fn upsert_records(&self, records: &[DailyRecord]) -> Result<(), SeriesRepositoryError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO daily_records (series, pool_id, date, day_delta, running_total, reference_block_timestamp)",
        );
        query_builder.push_values(records, |mut b, record| {
            b.push_bind(record.kind.as_str())
                .push_bind(encode_pool(record.pool_id))
                .push_bind(record.date)
                .push_bind(record.day_delta.clone())
                .push_bind(record.running_total.clone())
                .push_bind(record.reference_block_timestamp as i64);
        });
        query_builder.push(
            " ON CONFLICT (series, pool_id, date) DO UPDATE SET \
             day_delta = EXCLUDED.day_delta, \
             running_total = EXCLUDED.running_total, \
             reference_block_timestamp = EXCLUDED.reference_block_timestamp",
        );
        query_builder.build().execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn latest_record(
        &self,
        kind: EventKind,
    ) -> Result<Option<DailyRecord>, SeriesRepositoryError> {
        let row = sqlx::query(
            "SELECT pool_id, date, day_delta, running_total, reference_block_timestamp \
             FROM daily_records WHERE series = $1 \
             ORDER BY date DESC, reference_block_timestamp DESC LIMIT 1",
        )
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| record_from_row(kind, &row)))
    }

    async fn latest_record_before(
        &self,
        kind: EventKind,
        pool_id: Option<u64>,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, SeriesRepositoryError> {
        let row = sqlx::query(
            "SELECT pool_id, date, day_delta, running_total, reference_block_timestamp \
             FROM daily_records WHERE series = $1 AND pool_id = $2 AND date < $3 \
             ORDER BY date DESC LIMIT 1",
        )
        .bind(kind.as_str())
        .bind(encode_pool(pool_id))
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| record_from_row(kind, &row)))
    }

    async fn records_in_range(
        &self,
        kind: EventKind,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<DailyRecord>, SeriesRepositoryError> {
        let rows = sqlx::query(
            "SELECT pool_id, date, day_delta, running_total, reference_block_timestamp \
             FROM daily_records WHERE series = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date ASC, pool_id ASC",
        )
        .bind(kind.as_str())
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| record_from_row(kind, row)).collect())
    }
}
