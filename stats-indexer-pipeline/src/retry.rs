use stats_indexer_shared::types::RetryPolicy;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

/// Sleep intervals for the retries of a bounded fixed-delay policy.
pub(crate) fn intervals(policy: &RetryPolicy) -> impl Iterator<Item = Duration> {
    FixedInterval::new(policy.delay).take(policy.retries())
}
