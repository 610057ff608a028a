//! # Stats Indexer Shared
//! This crate defines shared data structures and types used across the stats
//! indexer ecosystem. It includes common definitions for event kinds, raw and
//! enriched events, daily records, checkpoints, block ranges and retry policy.
pub mod types;
