//! Error types for the block-time lookup.
use crate::errors::LedgerError;
use thiserror::Error;

/// Represents errors that can occur while resolving a timestamp to a block
/// height.
#[derive(Debug, Error)]
pub enum BlockTimeError {
    #[error("no block at or before timestamp {target}; lower bound {lower_bound} is newer")]
    TargetBeforeLowerBound { target: u64, lower_bound: u64 },
    #[error("ledger has no data around block {block}")]
    MissingSample { block: u64 },
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
