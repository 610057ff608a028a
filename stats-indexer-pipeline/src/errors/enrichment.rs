//! Error types for the enrichment processor.
use crate::errors::LedgerError;
use thiserror::Error;

/// Represents the failure of a single enrichment query after exhausting its
/// retry budget.
#[derive(Debug, Error, Clone)]
pub enum EnrichmentError {
    #[error("ledger query failed: {0}")]
    Ledger(#[from] LedgerError),
}
