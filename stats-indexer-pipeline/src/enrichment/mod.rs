//! Batch enrichment of raw events against the ledger read interface.
//!
//! Derivations that need chain state are evaluated as of an explicit
//! historical block, in fixed-size batches with a completion barrier between
//! them and a fixed delay to stay under provider rate limits. Chain queries
//! go through `LedgerClient::call_batch`, so a provider with a native batch
//! endpoint serves a whole batch in one round trip while plain providers fan
//! out concurrent single calls.

use crate::errors::{EnrichmentError, LedgerError};
use crate::ledger::{LedgerClient, QuerySpec};
use alloy::primitives::{TxHash, U256};
use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;
use std::time::Duration;
use stats_indexer_shared::types::{EnrichedEvent, EventPayload, RawEvent, RetryPolicy, to_tokens};
use tracing::{info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_secs(1);

/// How one event's derived value is obtained.
enum Derivation {
    /// Carried by the event itself; only unit conversion is needed.
    Intrinsic(U256),
    /// Computed on chain as of the pinned block.
    Query(QuerySpec),
}

fn derivation(event: &RawEvent) -> Derivation {
    match &event.payload {
        EventPayload::Staked { pool_id, user, .. } => {
            Derivation::Query(QuerySpec::CurrentUserReward {
                pool_id: *pool_id,
                user: *user,
            })
        }
        payload => Derivation::Intrinsic(payload.amount()),
    }
}

/// One enrichment query that exhausted its retry budget.
#[derive(Clone, Debug)]
pub struct EnrichmentFailure {
    pub tx_hash: TxHash,
    pub error: EnrichmentError,
}

/// Result of enriching one collection of events.
///
/// Every input event appears in `events`; the ones listed in `failures` carry
/// the zero sentinel value instead of a derived one, so callers can decide
/// whether to proceed with partial data.
#[derive(Clone, Debug, Default)]
pub struct EnrichmentReport {
    pub events: Vec<EnrichedEvent>,
    pub failures: Vec<EnrichmentFailure>,
}

/// Enriches events with on-chain derived values, batch by batch.
pub struct EnrichmentProcessor {
    ledger: Arc<dyn LedgerClient>,
    batch_size: usize,
    inter_batch_delay: Duration,
    retry: RetryPolicy,
}

impl EnrichmentProcessor {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enriches `events`, evaluating every chain query as of `as_of_block`.
    ///
    /// Queries within a batch run concurrently and the whole batch is awaited
    /// before the next one starts, bounding in-flight requests to the batch
    /// size. A query that exhausts its retries marks its event with a zero
    /// sentinel and is reported in the result; it is never dropped.
    pub async fn enrich(&self, events: &[RawEvent], as_of_block: u64) -> EnrichmentReport {
        let mut report = EnrichmentReport::default();
        let total_batches = events.len().div_ceil(self.batch_size.max(1));

        for (index, batch) in events.chunks(self.batch_size).enumerate() {
            info!(
                batch = index + 1,
                total = total_batches,
                "processing enrichment batch"
            );

            let results = self.derive_batch(batch, as_of_block).await;

            for (event, result) in batch.iter().zip(results) {
                match result {
                    Ok(derived_value) => report.events.push(EnrichedEvent {
                        raw: event.clone(),
                        derived_value,
                        derivation_block: as_of_block,
                    }),
                    Err(error) => {
                        warn!(
                            tx_hash = %event.tx_hash,
                            block = event.block_number,
                            error = %error,
                            "enrichment failed after retries; keeping event with zero value"
                        );
                        report.events.push(EnrichedEvent {
                            raw: event.clone(),
                            derived_value: BigDecimal::zero(),
                            derivation_block: as_of_block,
                        });
                        report.failures.push(EnrichmentFailure {
                            tx_hash: event.tx_hash,
                            error,
                        });
                    }
                }
            }

            if index + 1 < total_batches {
                tokio::time::sleep(self.inter_batch_delay).await;
            }
        }
        report
    }

    /// Derives values for one batch: intrinsic events resolve locally, the
    /// rest go through `call_batch` rounds. Entries that fail transiently are
    /// retried as a shrinking sub-batch under the retry policy, keeping the
    /// last error when the budget runs out.
    async fn derive_batch(
        &self,
        events: &[RawEvent],
        as_of_block: u64,
    ) -> Vec<Result<BigDecimal, EnrichmentError>> {
        let mut results: Vec<Result<BigDecimal, EnrichmentError>> =
            Vec::with_capacity(events.len());
        let mut pending: Vec<(usize, QuerySpec)> = Vec::new();
        for (index, event) in events.iter().enumerate() {
            match derivation(event) {
                Derivation::Intrinsic(amount) => results.push(Ok(to_tokens(amount))),
                Derivation::Query(spec) => {
                    // overwritten by the query rounds below
                    results.push(Err(EnrichmentError::Ledger(LedgerError::RateLimited)));
                    pending.push((index, spec));
                }
            }
        }

        for attempt in 1..=self.retry.max_attempts {
            if pending.is_empty() {
                break;
            }
            if attempt > 1 {
                warn!(
                    retrying = pending.len(),
                    attempt, "retrying transient enrichment failures"
                );
                tokio::time::sleep(self.retry.delay).await;
            }

            let queries: Vec<QuerySpec> = pending.iter().map(|(_, spec)| spec.clone()).collect();
            let outcomes = self.ledger.call_batch(&queries, as_of_block).await;

            let mut retryable = Vec::new();
            for ((index, spec), outcome) in pending.into_iter().zip(outcomes) {
                match outcome {
                    Ok(raw) => results[index] = Ok(to_tokens(raw)),
                    Err(error) if error.is_transient() => {
                        results[index] = Err(error.clone().into());
                        retryable.push((index, spec));
                    }
                    Err(error) => results[index] = Err(error.into()),
                }
            }
            pending = retryable;
        }
        results
    }
}
