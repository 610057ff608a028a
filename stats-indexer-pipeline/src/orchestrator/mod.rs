//! This module defines the `Pipeline` responsible for coordinating the
//! event ingestion run.
//! It sequences checkpoint resolution, log fetching, enrichment, aggregation
//! and persistence per event kind, and reports the outcome of each run.

use crate::aggregator::aggregate;
use crate::block_time::BlockTimeIndex;
use crate::enrichment::EnrichmentProcessor;
use crate::errors::PipelineError;
use crate::fetcher::LogFetcher;
use crate::ledger::LedgerClient;
use crate::notify::NotificationSink;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use stats_indexer_repository::{CheckpointRepository, SeriesRepository};
use stats_indexer_shared::types::{BlockRange, Checkpoint, EventKind};
use tracing::{error, info};

/// Static description of one ingested series.
#[derive(Clone, Copy, Debug)]
pub struct SeriesSpec {
    pub kind: EventKind,
    /// First block worth scanning; the tracked contract's deploy height.
    pub deploy_block: u64,
}

/// Counters for one per-kind run, used for logging and notifications.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub kind: EventKind,
    pub scanned: Option<BlockRange>,
    pub events_fetched: usize,
    pub malformed_skipped: usize,
    pub failed_ranges: Vec<BlockRange>,
    pub enrichment_failures: usize,
    pub records_upserted: usize,
    pub checkpoint: Option<u64>,
}

impl RunReport {
    fn idle(kind: EventKind, checkpoint: Option<u64>) -> Self {
        Self {
            kind,
            scanned: None,
            events_fetched: 0,
            malformed_skipped: 0,
            failed_ranges: Vec::new(),
            enrichment_failures: 0,
            records_upserted: 0,
            checkpoint,
        }
    }

    /// One-line human summary for the notification sink.
    pub fn summary(&self) -> String {
        let mut line = format!("{}: ", self.kind);
        match self.scanned {
            Some(range) => {
                let _ = write!(
                    line,
                    "scanned {}, {} events, {} records upserted",
                    range, self.events_fetched, self.records_upserted
                );
                if !self.failed_ranges.is_empty() {
                    let _ = write!(line, ", {} ranges failed", self.failed_ranges.len());
                }
                if self.enrichment_failures > 0 {
                    let _ = write!(line, ", {} enrichment failures", self.enrichment_failures);
                }
                if self.malformed_skipped > 0 {
                    let _ = write!(line, ", {} malformed logs skipped", self.malformed_skipped);
                }
            }
            None => {
                let _ = write!(line, "no new blocks");
            }
        }
        line
    }
}

/// `Pipeline` is responsible for coordinating the fetching, enrichment,
/// aggregation and persistence of event series.
///
/// Kinds run strictly one after another; the checkpoint of a kind is only
/// written by its own run, which keeps the read-then-write discipline single
/// writer.
pub struct Pipeline {
    ledger: Arc<dyn LedgerClient>,
    series: Arc<dyn SeriesRepository>,
    checkpoints: Arc<dyn CheckpointRepository>,
    notifier: Arc<dyn NotificationSink>,
    fetcher: LogFetcher,
    enricher: EnrichmentProcessor,
    specs: Vec<SeriesSpec>,
}

impl Pipeline {
    /// Creates a new `Pipeline` instance from its collaborators.
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        series: Arc<dyn SeriesRepository>,
        checkpoints: Arc<dyn CheckpointRepository>,
        notifier: Arc<dyn NotificationSink>,
        fetcher: LogFetcher,
        enricher: EnrichmentProcessor,
        specs: Vec<SeriesSpec>,
    ) -> Self {
        Self {
            ledger,
            series,
            checkpoints,
            notifier,
            fetcher,
            enricher,
            specs,
        }
    }

    /// Runs every configured series once, sequentially.
    ///
    /// Per-event and per-range failures are absorbed into the reports; a
    /// kind-level failure (checkpoint store unreachable, head unavailable)
    /// aborts the run after notifying, since progress cannot be tracked
    /// safely without it.
    pub async fn run(&self) -> Result<Vec<RunReport>, PipelineError> {
        let mut reports = Vec::with_capacity(self.specs.len());

        for spec in &self.specs {
            info!(kind = %spec.kind, "starting series run");
            match self.run_series(spec).await {
                Ok(report) => {
                    info!(kind = %report.kind, summary = %report.summary(), "series run finished");
                    reports.push(report);
                }
                Err(e) => {
                    error!(kind = %spec.kind, error = %e, "series run failed");
                    self.notifier
                        .notify(&format!("stats pipeline failed for {}: {}", spec.kind, e))
                        .await;
                    return Err(e);
                }
            }
        }

        let mut message = String::from("stats pipeline run completed");
        for report in &reports {
            let _ = write!(message, "\n{}", report.summary());
        }
        self.notifier.notify(&message).await;

        Ok(reports)
    }

    async fn run_series(&self, spec: &SeriesSpec) -> Result<RunReport, PipelineError> {
        let head = self.ledger.head_number().await?;
        let from = self.resolve_start_block(spec).await?;

        let previous_checkpoint = from.checked_sub(1);
        if from > head {
            info!(kind = %spec.kind, from, head, "no new blocks to process");
            return Ok(RunReport::idle(spec.kind, previous_checkpoint));
        }

        let range = BlockRange::new(from, head);
        let fetched = self.fetcher.fetch(spec.kind, range).await;

        // Enrichment is pinned to the head snapshot taken above, so derived
        // values are reproducible for this run.
        let enrichment = self.enricher.enrich(&fetched.events, head).await;

        let baselines = self.load_baselines(spec.kind, &enrichment.events).await?;
        let records = aggregate(spec.kind, &enrichment.events, &baselines);
        self.series.upsert_records(&records).await?;

        let checkpoint = fetched.high_water.or(previous_checkpoint);
        if let Some(block) = fetched.high_water {
            self.checkpoints
                .set_checkpoint(&Checkpoint {
                    kind: spec.kind,
                    last_processed_block: block,
                })
                .await?;
        }

        Ok(RunReport {
            kind: spec.kind,
            scanned: Some(range),
            events_fetched: fetched.events.len(),
            malformed_skipped: fetched.malformed,
            failed_ranges: fetched.failed_ranges,
            enrichment_failures: enrichment.failures.len(),
            records_upserted: records.len(),
            checkpoint,
        })
    }

    /// Start of the next unprocessed range, in order of preference: after
    /// the stored checkpoint, after the block of the newest stored record
    /// (resolved via block-time search), or the deploy block.
    async fn resolve_start_block(&self, spec: &SeriesSpec) -> Result<u64, PipelineError> {
        if let Some(checkpoint) = self.checkpoints.get_checkpoint(spec.kind).await? {
            return Ok(checkpoint.last_processed_block + 1);
        }

        if let Some(latest) = self.series.latest_record(spec.kind).await? {
            let index = BlockTimeIndex::new(self.ledger.as_ref(), spec.deploy_block);
            let block = index
                .find_block_at_or_before(latest.reference_block_timestamp)
                .await?;
            info!(
                kind = %spec.kind,
                block,
                timestamp = latest.reference_block_timestamp,
                "resumed from newest stored record"
            );
            return Ok(block + 1);
        }

        Ok(spec.deploy_block)
    }

    /// Newest stored record strictly before each entity's first aggregated
    /// date, so replayed windows recompute the same totals.
    async fn load_baselines(
        &self,
        kind: EventKind,
        events: &[stats_indexer_shared::types::EnrichedEvent],
    ) -> Result<Vec<stats_indexer_shared::types::DailyRecord>, PipelineError> {
        let mut first_dates: HashMap<Option<u64>, NaiveDate> = HashMap::new();
        for event in events {
            first_dates
                .entry(event.entity())
                .and_modify(|date| *date = (*date).min(event.date()))
                .or_insert_with(|| event.date());
        }

        let mut baselines = Vec::with_capacity(first_dates.len());
        for (entity, first_date) in first_dates {
            if let Some(baseline) = self
                .series
                .latest_record_before(kind, entity, first_date)
                .await?
            {
                baselines.push(baseline);
            }
        }
        Ok(baselines)
    }
}
