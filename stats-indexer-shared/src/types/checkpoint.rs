use crate::types::EventKind;

/// Resumption cursor for one event kind.
///
/// `last_processed_block` is monotonically non-decreasing and only advances
/// past block ranges that were fetched without gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub kind: EventKind,
    pub last_processed_block: u64,
}
