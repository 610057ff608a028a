//! Error types for log decoding within the fetcher.
use thiserror::Error;

/// Represents a log record that does not match the expected event layout.
///
/// Malformed records are skipped and logged by the fetcher; they never abort
/// the chunk they arrived in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} topics, found {found}")]
    TopicCount { expected: usize, found: usize },
    #[error("log data too short: {0} bytes")]
    TruncatedData(usize),
    #[error("pool id does not fit in 64 bits")]
    PoolIdOutOfRange,
    #[error("malformed dynamic field at offset {0}")]
    BadDynamicField(usize),
}
