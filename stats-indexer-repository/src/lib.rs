//! # Stats Indexer Repository
//! This crate provides traits and implementations for persisting the daily
//! series and the per-kind resumption checkpoints. It includes definitions
//! for errors, interfaces, and concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::{CheckpointRepositoryError, SeriesRepositoryError};
pub use interfaces::{CheckpointRepository, SeriesRepository};
pub use postgres::{PostgresCheckpointRepository, PostgresSeriesRepository};
