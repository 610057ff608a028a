//! Ledger client interface for the pipeline.
//!
//! Provides the `LedgerClient` trait every pipeline component reads the chain
//! through, plus the concrete JSON-RPC implementation. The wire format is an
//! implementation detail of `RpcLedgerClient`; the rest of the pipeline only
//! sees headers, log records and query results.

use crate::errors::LedgerError;
use alloy::primitives::{Address, Bytes, U256, keccak256};
use async_trait::async_trait;
use stats_indexer_shared::types::{BlockRange, EventKind, LogRecord};

pub mod rpc;

pub use rpc::RpcLedgerClient;

/// Height and timestamp of one ledger block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub timestamp: u64,
}

/// A read-only contract query, evaluated as of an explicit historical block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuerySpec {
    /// `getCurrentUserReward(uint256,address)` on the distribution contract.
    CurrentUserReward { pool_id: u64, user: Address },
}

impl QuerySpec {
    /// ABI-encoded calldata for the query.
    pub fn calldata(&self) -> Bytes {
        match self {
            QuerySpec::CurrentUserReward { pool_id, user } => {
                let selector = &keccak256(b"getCurrentUserReward(uint256,address)")[..4];
                let mut data = Vec::with_capacity(4 + 64);
                data.extend_from_slice(selector);
                data.extend_from_slice(&U256::from(*pool_id).to_be_bytes::<32>());
                data.extend_from_slice(&[0u8; 12]);
                data.extend_from_slice(user.as_slice());
                Bytes::from(data)
            }
        }
    }
}

/// Trait for reading blocks, event logs and contract state from the ledger.
///
/// Provides a unified interface for different providers (JSON-RPC, mocks).
/// All methods are read-only; `call` must honor the `as_of_block` pin so
/// derived values are reproducible for historical dates.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current head block height.
    async fn head_number(&self) -> Result<u64, LedgerError>;

    /// Header of a specific block. Fails with `BlockNotFound` when the
    /// provider has no data for the height.
    async fn block_header(&self, number: u64) -> Result<BlockHeader, LedgerError>;

    /// Raw logs of `kind` emitted by the tracked contract within `range`
    /// (inclusive).
    async fn logs(&self, kind: EventKind, range: BlockRange)
    -> Result<Vec<LogRecord>, LedgerError>;

    /// Evaluates a read-only query as of `as_of_block`, never the head.
    async fn call(&self, query: &QuerySpec, as_of_block: u64) -> Result<U256, LedgerError>;

    /// Evaluates many queries as of the same block, one result per query.
    ///
    /// The default implementation fans the queries out as concurrent single
    /// calls; providers with a native batch endpoint can override it with a
    /// single round trip.
    async fn call_batch(
        &self,
        queries: &[QuerySpec],
        as_of_block: u64,
    ) -> Vec<Result<U256, LedgerError>> {
        futures::future::join_all(queries.iter().map(|query| self.call(query, as_of_block))).await
    }
}
