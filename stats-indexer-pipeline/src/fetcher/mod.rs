//! Resumable, batch-bounded retrieval of contract event logs.
//!
//! Provider log queries cap the spannable block range, so a requested range
//! is split into fixed-size chunks fetched sequentially. A failing chunk is
//! recorded and skipped; later chunks are still fetched, and the caller gets
//! the high-water mark up to which results are gap-free for checkpointing.

use crate::errors::LedgerError;
use crate::ledger::LedgerClient;
use crate::retry::intervals;
use std::sync::Arc;
use stats_indexer_shared::types::{BlockRange, EventKind, LogRecord, RawEvent, RetryPolicy};
use tokio_retry::RetryIf;
use tracing::{debug, warn};

pub mod decode;

pub use decode::decode_log;

/// Default chunk span; providers commonly cap `eth_getLogs` well above this
/// for a single-contract filter.
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;

/// Result of one fetch over a block range.
#[derive(Clone, Debug, Default)]
pub struct FetchOutcome {
    /// Decoded events from every chunk that succeeded, in chunk order.
    pub events: Vec<RawEvent>,
    /// Chunks that failed after exhausting retries; schedule these again.
    pub failed_ranges: Vec<BlockRange>,
    /// End of the longest contiguous successful prefix of the range. The
    /// checkpoint may advance to here and no further.
    pub high_water: Option<u64>,
    /// Log records skipped because they did not match the event layout.
    pub malformed: usize,
}

/// Fetches and decodes event logs chunk by chunk.
pub struct LogFetcher {
    ledger: Arc<dyn LedgerClient>,
    chunk_size: u64,
    retry: RetryPolicy,
}

impl LogFetcher {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            chunk_size: DEFAULT_CHUNK_SIZE,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches logs of `kind` over `range`, isolating per-chunk failures.
    ///
    /// Chunks are fetched in ascending order; transient provider errors are
    /// retried under the fetcher's policy before the chunk is given up on.
    /// A failed chunk never aborts the chunks after it, but it does freeze
    /// `high_water` so no block can be skipped by a checkpoint advance.
    pub async fn fetch(&self, kind: EventKind, range: BlockRange) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        let mut contiguous = true;

        for chunk in range.chunks(self.chunk_size) {
            match self.fetch_chunk(kind, chunk).await {
                Ok(records) => {
                    debug!(kind = %kind, from = chunk.from, to = chunk.to, logs = records.len(), "fetched log chunk");
                    for record in &records {
                        match decode_log(kind, record) {
                            Ok(event) => outcome.events.push(event),
                            Err(e) => {
                                warn!(
                                    kind = %kind,
                                    tx_hash = %record.tx_hash,
                                    block = record.block_number,
                                    error = %e,
                                    "skipping malformed log record"
                                );
                                outcome.malformed += 1;
                            }
                        }
                    }
                    if contiguous {
                        outcome.high_water = Some(chunk.to);
                    }
                }
                Err(e) => {
                    warn!(kind = %kind, from = chunk.from, to = chunk.to, error = %e, "log chunk failed; continuing with later chunks");
                    outcome.failed_ranges.push(chunk);
                    contiguous = false;
                }
            }
        }
        outcome
    }

    async fn fetch_chunk(
        &self,
        kind: EventKind,
        chunk: BlockRange,
    ) -> Result<Vec<LogRecord>, LedgerError> {
        RetryIf::spawn(
            intervals(&self.retry),
            || self.ledger.logs(kind, chunk),
            |e: &LedgerError| e.is_transient(),
        )
        .await
    }
}
