//! # Stats Indexer Pipeline
//! This crate defines the core components of the incremental event-ingestion
//! and aggregation pipeline: the ledger client interface, block-time lookup,
//! log fetching with checkpoint semantics, batch enrichment, daily
//! aggregation, and the orchestrator that sequences them per event kind.
pub mod aggregator;
pub mod block_time;
pub mod enrichment;
pub mod fetcher;
pub mod ledger;
pub mod notify;
pub mod orchestrator;

pub mod errors;

pub(crate) mod retry;
