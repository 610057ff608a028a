//! Resolves wall-clock timestamps to block heights.
//!
//! Used when no checkpoint exists yet: the newest stored record only carries
//! a block timestamp, and the pipeline needs the block height to resume from.

use crate::errors::{BlockTimeError, LedgerError};
use crate::ledger::LedgerClient;
use std::collections::HashMap;

/// Binary search over block heights by timestamp.
///
/// `find_block_at_or_before` returns the greatest block whose timestamp is at
/// or before the target, never the least block after it; downstream
/// reconciliation depends on that asymmetry. Midpoint timestamps are memoized
/// for the duration of one search so interval collapse does not repeat
/// provider calls.
pub struct BlockTimeIndex<'a> {
    ledger: &'a dyn LedgerClient,
    lower_bound: u64,
}

impl<'a> BlockTimeIndex<'a> {
    /// # Arguments
    ///
    /// * `ledger` - Ledger read interface.
    /// * `lower_bound` - A block known to exist at or before any timestamp
    ///   the index will be asked about (the contract deploy block).
    pub fn new(ledger: &'a dyn LedgerClient, lower_bound: u64) -> Self {
        Self {
            ledger,
            lower_bound,
        }
    }

    /// Finds the greatest block with `timestamp <= target`.
    ///
    /// O(log N) ledger calls against the current head. A missing midpoint
    /// (provider gap, reorged height) narrows the interval below it after the
    /// adjacent block confirms the provider still has data there; two missing
    /// neighbours fail the search with `MissingSample`.
    pub async fn find_block_at_or_before(&self, target: u64) -> Result<u64, BlockTimeError> {
        let mut memo: HashMap<u64, u64> = HashMap::new();
        let head = self.ledger.head_number().await?;
        let mut lo = self.lower_bound;
        let mut hi = head.max(lo);

        if self.timestamp_at(lo, &mut memo).await? > target {
            return Err(BlockTimeError::TargetBeforeLowerBound {
                target,
                lower_bound: lo,
            });
        }

        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            match self.timestamp_at(mid, &mut memo).await {
                Ok(timestamp) => {
                    if timestamp <= target {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                Err(BlockTimeError::Ledger(LedgerError::BlockNotFound(_))) => {
                    match self.timestamp_at(mid - 1, &mut memo).await {
                        Ok(_) => hi = mid - 1,
                        Err(BlockTimeError::Ledger(LedgerError::BlockNotFound(_))) => {
                            return Err(BlockTimeError::MissingSample { block: mid });
                        }
                        Err(e) => return Err(e),
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(lo)
    }

    async fn timestamp_at(
        &self,
        number: u64,
        memo: &mut HashMap<u64, u64>,
    ) -> Result<u64, BlockTimeError> {
        if let Some(timestamp) = memo.get(&number) {
            return Ok(*timestamp);
        }
        let header = self.ledger.block_header(number).await?;
        memo.insert(number, header.timestamp);
        Ok(header.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BlockHeader, QuerySpec};
    use alloy::primitives::U256;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use stats_indexer_shared::types::{BlockRange, EventKind, LogRecord};

    /// Chain fixture: block heights with fixed timestamps, some optionally
    /// missing, counting header lookups.
    struct FixtureLedger {
        blocks: Vec<(u64, u64)>,
        missing: HashSet<u64>,
        header_calls: Mutex<u64>,
    }

    impl FixtureLedger {
        fn new(blocks: Vec<(u64, u64)>) -> Self {
            Self {
                blocks,
                missing: HashSet::new(),
                header_calls: Mutex::new(0),
            }
        }

        fn with_missing(mut self, missing: &[u64]) -> Self {
            self.missing = missing.iter().copied().collect();
            self
        }
    }

    #[async_trait]
    impl LedgerClient for FixtureLedger {
        async fn head_number(&self) -> Result<u64, LedgerError> {
            Ok(self.blocks.last().expect("fixture has blocks").0)
        }

        async fn block_header(&self, number: u64) -> Result<BlockHeader, LedgerError> {
            *self.header_calls.lock().unwrap() += 1;
            if self.missing.contains(&number) {
                return Err(LedgerError::BlockNotFound(number));
            }
            self.blocks
                .iter()
                .find(|(n, _)| *n == number)
                .map(|(number, timestamp)| BlockHeader {
                    number: *number,
                    timestamp: *timestamp,
                })
                .ok_or(LedgerError::BlockNotFound(number))
        }

        async fn logs(
            &self,
            _kind: EventKind,
            _range: BlockRange,
        ) -> Result<Vec<LogRecord>, LedgerError> {
            unimplemented!("not used by block time tests")
        }

        async fn call(&self, _query: &QuerySpec, _as_of: u64) -> Result<U256, LedgerError> {
            unimplemented!("not used by block time tests")
        }
    }

    fn dense_chain(from: u64, to: u64, start_ts: u64, step: u64) -> Vec<(u64, u64)> {
        (from..=to)
            .map(|n| (n, start_ts + (n - from) * step))
            .collect()
    }

    #[tokio::test]
    async fn returns_block_at_or_before_target() {
        let ledger = FixtureLedger::new(vec![(100, 1000), (101, 1010), (102, 1025)]);
        let index = BlockTimeIndex::new(&ledger, 100);
        assert_eq!(index.find_block_at_or_before(1015).await.unwrap(), 101);
    }

    #[tokio::test]
    async fn exact_timestamp_match_returns_that_block() {
        let ledger = FixtureLedger::new(vec![(100, 1000), (101, 1010), (102, 1025)]);
        let index = BlockTimeIndex::new(&ledger, 100);
        assert_eq!(index.find_block_at_or_before(1010).await.unwrap(), 101);
    }

    #[tokio::test]
    async fn never_returns_the_least_block_after_the_target() {
        // every timestamp strictly between two blocks must resolve down
        let ledger = FixtureLedger::new(dense_chain(0, 63, 1_000, 12));
        let index = BlockTimeIndex::new(&ledger, 0);
        for block in 0..63u64 {
            let t1 = 1_000 + block * 12;
            for target in [t1, t1 + 1, t1 + 11] {
                assert_eq!(
                    index.find_block_at_or_before(target).await.unwrap(),
                    block,
                    "target {target}"
                );
            }
        }
    }

    #[tokio::test]
    async fn target_after_head_returns_head() {
        let ledger = FixtureLedger::new(vec![(100, 1000), (101, 1010)]);
        let index = BlockTimeIndex::new(&ledger, 100);
        assert_eq!(index.find_block_at_or_before(99_999).await.unwrap(), 101);
    }

    #[tokio::test]
    async fn target_before_lower_bound_is_an_error() {
        let ledger = FixtureLedger::new(vec![(100, 1000), (101, 1010)]);
        let index = BlockTimeIndex::new(&ledger, 100);
        let err = index.find_block_at_or_before(999).await.unwrap_err();
        assert!(matches!(
            err,
            BlockTimeError::TargetBeforeLowerBound {
                target: 999,
                lower_bound: 100
            }
        ));
    }

    #[tokio::test]
    async fn missing_midpoint_probes_neighbour_and_continues() {
        // mid of [100, 104] is 102; it is missing but 101 answers
        let ledger = FixtureLedger::new(vec![
            (100, 1000),
            (101, 1010),
            (102, 1020),
            (103, 1030),
            (104, 1040),
        ])
        .with_missing(&[102]);
        let index = BlockTimeIndex::new(&ledger, 100);
        assert_eq!(index.find_block_at_or_before(1015).await.unwrap(), 101);
    }

    #[tokio::test]
    async fn two_missing_neighbours_fail_explicitly() {
        let ledger = FixtureLedger::new(vec![
            (100, 1000),
            (101, 1010),
            (102, 1020),
            (103, 1030),
            (104, 1040),
        ])
        .with_missing(&[101, 102]);
        let index = BlockTimeIndex::new(&ledger, 100);
        let err = index.find_block_at_or_before(1015).await.unwrap_err();
        assert!(matches!(err, BlockTimeError::MissingSample { block: 102 }));
    }

    #[tokio::test]
    async fn memoization_avoids_repeat_header_fetches() {
        let ledger = FixtureLedger::new(dense_chain(0, 1023, 1_000, 12));
        let index = BlockTimeIndex::new(&ledger, 0);
        index.find_block_at_or_before(7_000).await.unwrap();
        let calls = *ledger.header_calls.lock().unwrap();
        // log2(1024) midpoints plus the lower bound, with slack for the
        // collapse step, far below a linear scan
        assert!(calls <= 13, "made {calls} header calls");
    }
}
