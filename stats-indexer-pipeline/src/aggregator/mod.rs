//! Deterministic aggregation of enriched events into daily records.
//!
//! A pure fold: the same events and baselines always produce the same
//! records, so replaying a window and upserting by natural key is idempotent.

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use stats_indexer_shared::types::{DailyRecord, EnrichedEvent, EventKind};

/// Folds enriched events of one kind into per-day records.
///
/// Events are ordered by the stable key `(block_number, tx_hash)` so results
/// do not depend on fetch or retry arrival order, then grouped by
/// `(entity, date)`, where the entity is the pool for pool-keyed kinds and
/// the whole series otherwise. Each group yields exactly one record:
/// `day_delta` is the exact sum of derived values and
/// `reference_block_timestamp` the newest contributing block.
///
/// `baselines` carry the newest stored record per entity from strictly
/// before the aggregated window; running totals continue from them (or from
/// zero) and are carried forward across days with no events, walking dates
/// in ascending order.
pub fn aggregate(
    kind: EventKind,
    events: &[EnrichedEvent],
    baselines: &[DailyRecord],
) -> Vec<DailyRecord> {
    let mut ordered: Vec<&EnrichedEvent> = events.iter().collect();
    ordered.sort_by_key(|event| (event.raw.block_number, event.raw.tx_hash));

    let mut groups: BTreeMap<(Option<u64>, NaiveDate), (BigDecimal, u64)> = BTreeMap::new();
    for event in ordered {
        let entry = groups
            .entry((event.entity(), event.date()))
            .or_insert_with(|| (BigDecimal::zero(), 0));
        entry.0 += &event.derived_value;
        entry.1 = entry.1.max(event.raw.block_timestamp);
    }

    let mut totals: HashMap<Option<u64>, BigDecimal> = baselines
        .iter()
        .map(|record| (record.pool_id, record.running_total.clone()))
        .collect();

    let mut records = Vec::with_capacity(groups.len());
    for ((entity, date), (day_delta, reference_block_timestamp)) in groups {
        let running_total = totals.entry(entity).or_insert_with(BigDecimal::zero);
        *running_total += &day_delta;
        records.push(DailyRecord {
            kind,
            pool_id: entity,
            date,
            day_delta,
            running_total: running_total.clone(),
            reference_block_timestamp,
        });
    }
    records
}
