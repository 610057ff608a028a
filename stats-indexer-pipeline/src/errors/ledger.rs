//! Error types for the ledger client interface.
//! Classifies provider failures so retry handling stays uniform across the
//! pipeline.
use stats_indexer_shared::types::BlockRange;
use thiserror::Error;

/// Represents failures of the read-only ledger interface.
///
/// Transient variants are eligible for bounded retry; the rest indicate data
/// the provider genuinely does not have (or cannot serve in one request) and
/// must be handled by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("block {0} not found")]
    BlockNotFound(u64),
    #[error("log range {0} exceeds provider limits")]
    RangeTooLarge(BlockRange),
    #[error("rate limited by provider")]
    RateLimited,
    #[error("provider error: {0}")]
    Provider(String),
}

impl LedgerError {
    /// Whether retrying the same request can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::RateLimited | LedgerError::Provider(_))
    }
}
