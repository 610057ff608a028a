//! PostgreSQL implementations of the stats indexer repositories.
mod checkpoint_repository;
mod series_repository;

pub use checkpoint_repository::PostgresCheckpointRepository;
pub use series_repository::PostgresSeriesRepository;

/// Pool column encoding: global series are stored with `-1` so the
/// `(series, pool_id, date)` primary key stays NOT NULL (Postgres unique
/// indexes do not treat NULLs as equal).
pub(crate) fn encode_pool(pool_id: Option<u64>) -> i64 {
    pool_id.map(|p| p as i64).unwrap_or(-1)
}

pub(crate) fn decode_pool(raw: i64) -> Option<u64> {
    (raw >= 0).then_some(raw as u64)
}
