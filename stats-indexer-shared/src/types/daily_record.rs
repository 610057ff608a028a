use crate::types::EventKind;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a persisted series.
///
/// Natural key is `(kind, pool_id, date)`; aggregation emits at most one
/// record per key and storage upserts by it, so replaying a window rewrites
/// records instead of duplicating them. For supply-like series
/// `running_total` never decreases across dates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub kind: EventKind,
    /// Pool the record belongs to; `None` for global series.
    pub pool_id: Option<u64>,
    pub date: NaiveDate,
    /// Sum of derived values for events on this date.
    pub day_delta: BigDecimal,
    /// Cumulative total as of the end of this date.
    pub running_total: BigDecimal,
    /// Timestamp of the newest block contributing to this record.
    pub reference_block_timestamp: u64,
}
