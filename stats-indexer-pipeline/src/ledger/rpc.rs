//! JSON-RPC implementation of the ledger client.
//!
//! Wraps an alloy HTTP provider scoped to one distribution contract. Log
//! queries are filtered by contract address and `topic0`; providers that omit
//! `blockTimestamp` on logs get the timestamp backfilled from the block
//! header, one header fetch per distinct block.

use crate::errors::LedgerError;
use crate::ledger::{BlockHeader, LedgerClient, QuerySpec};
use alloy::eips::BlockNumberOrTag;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::{Filter, TransactionRequest};
use alloy::transports::TransportError;
use async_trait::async_trait;
use std::collections::HashMap;
use stats_indexer_shared::types::{BlockRange, EventKind, LogRecord};
use tracing::debug;

/// Ledger client backed by an EVM JSON-RPC endpoint.
pub struct RpcLedgerClient {
    provider: RootProvider,
    contract: Address,
}

impl RpcLedgerClient {
    /// Creates a client for one RPC endpoint and one tracked contract.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - HTTP(S) JSON-RPC endpoint.
    /// * `contract` - Address of the distribution contract whose events and
    ///   state are read.
    pub fn new(rpc_url: &str, contract: Address) -> Result<Self, LedgerError> {
        let url = rpc_url
            .parse::<url::Url>()
            .map_err(|e| LedgerError::Provider(format!("invalid rpc url: {e}")))?;
        Ok(Self {
            provider: RootProvider::new_http(url),
            contract,
        })
    }
}

fn classify(error: TransportError) -> LedgerError {
    let message = error.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("too many requests")
        || lowered.contains("rate limit")
        || lowered.contains("429")
    {
        LedgerError::RateLimited
    } else {
        LedgerError::Provider(message)
    }
}

fn classify_log_query(error: TransportError, range: BlockRange) -> LedgerError {
    let lowered = error.to_string().to_lowercase();
    if lowered.contains("block range") || lowered.contains("range is too large") {
        LedgerError::RangeTooLarge(range)
    } else {
        classify(error)
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn head_number(&self) -> Result<u64, LedgerError> {
        self.provider.get_block_number().await.map_err(classify)
    }

    async fn block_header(&self, number: u64) -> Result<BlockHeader, LedgerError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(classify)?
            .ok_or(LedgerError::BlockNotFound(number))?;

        Ok(BlockHeader {
            number: block.header.number,
            timestamp: block.header.timestamp,
        })
    }

    async fn logs(
        &self,
        kind: EventKind,
        range: BlockRange,
    ) -> Result<Vec<LogRecord>, LedgerError> {
        let filter = Filter::new()
            .address(self.contract)
            .event_signature(kind.topic0())
            .from_block(range.from)
            .to_block(range.to);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| classify_log_query(e, range))?;

        // Not every provider attaches blockTimestamp to logs; fetch each
        // distinct header once for the rest.
        let mut timestamps: HashMap<u64, u64> = HashMap::new();
        for log in &logs {
            if let (Some(number), Some(timestamp)) = (log.block_number, log.block_timestamp) {
                timestamps.insert(number, timestamp);
            }
        }
        for log in &logs {
            if let Some(number) = log.block_number {
                if !timestamps.contains_key(&number) {
                    let header = self.block_header(number).await?;
                    timestamps.insert(number, header.timestamp);
                }
            }
        }

        let mut records = Vec::with_capacity(logs.len());
        for log in logs {
            let (Some(block_number), Some(tx_hash)) = (log.block_number, log.transaction_hash)
            else {
                debug!(kind = %kind, "skipping pending log without block coordinates");
                continue;
            };
            records.push(LogRecord {
                block_number,
                block_timestamp: timestamps.get(&block_number).copied().unwrap_or(0),
                tx_hash,
                topics: log.inner.data.topics().to_vec(),
                data: log.inner.data.data.clone(),
            });
        }
        Ok(records)
    }

    async fn call(&self, query: &QuerySpec, as_of_block: u64) -> Result<U256, LedgerError> {
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_input(query.calldata());

        let ret = self
            .provider
            .call(tx)
            .block(as_of_block.into())
            .await
            .map_err(classify)?;

        if ret.len() < 32 {
            return Err(LedgerError::Provider(format!(
                "short return data: {} bytes",
                ret.len()
            )));
        }
        Ok(U256::from_be_slice(&ret[..32]))
    }
}
