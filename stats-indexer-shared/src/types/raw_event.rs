use crate::types::{EventKind, EventPayload};
use alloy::primitives::TxHash;
use chrono::{DateTime, NaiveDate};

/// A decoded contract event, immutable once fetched.
///
/// Holds the chain coordinates common to all kinds plus the kind-specific
/// payload resolved at fetch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub tx_hash: TxHash,
    pub payload: EventPayload,
}

impl RawEvent {
    /// UTC calendar day of the block the event landed in.
    pub fn date(&self) -> NaiveDate {
        DateTime::from_timestamp(self.block_timestamp as i64, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }

    /// Aggregation entity key: the pool for pool-keyed kinds, `None` for
    /// global series.
    pub fn entity(&self) -> Option<u64> {
        if self.kind.pool_keyed() {
            self.payload.pool_id()
        } else {
            None
        }
    }
}
