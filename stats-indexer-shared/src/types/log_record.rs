use alloy::primitives::{B256, Bytes, TxHash};

/// A raw log as returned by the ledger client, before kind-specific decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub tx_hash: TxHash,
    pub topics: Vec<B256>,
    pub data: Bytes,
}
