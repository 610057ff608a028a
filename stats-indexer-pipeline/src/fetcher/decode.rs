//! Per-kind decoding of raw log records into typed events.
//!
//! Layouts follow the distribution contract ABI: `UserStaked`,
//! `UserWithdrawn` and `UserClaimed` index the pool and the user;
//! `OverplusBridged` carries its fields in the data section, including an
//! ABI-dynamic `bytes` id.

use crate::errors::DecodeError;
use alloy::primitives::{Address, B256, Bytes, U256};
use stats_indexer_shared::types::{EventKind, EventPayload, LogRecord, RawEvent};

pub fn decode_log(kind: EventKind, record: &LogRecord) -> Result<RawEvent, DecodeError> {
    let payload = match kind {
        EventKind::UserStaked => {
            let (pool_id, user) = indexed_pool_and_user(record)?;
            EventPayload::Staked {
                pool_id,
                user,
                amount: data_word(record, 0)?,
            }
        }
        EventKind::UserWithdrawn => {
            let (pool_id, user) = indexed_pool_and_user(record)?;
            EventPayload::Withdrawn {
                pool_id,
                user,
                amount: data_word(record, 0)?,
            }
        }
        EventKind::UserClaimed => {
            let (pool_id, user) = indexed_pool_and_user(record)?;
            EventPayload::Claimed {
                pool_id,
                user,
                receiver: Address::from_word(word(record, 0)?),
                amount: data_word(record, 1)?,
            }
        }
        EventKind::OverplusBridged => {
            expect_topics(record, 1)?;
            EventPayload::Bridged {
                amount: data_word(record, 0)?,
                unique_id: dynamic_bytes(record, 1)?,
            }
        }
    };

    Ok(RawEvent {
        kind,
        block_number: record.block_number,
        block_timestamp: record.block_timestamp,
        tx_hash: record.tx_hash,
        payload,
    })
}

fn expect_topics(record: &LogRecord, expected: usize) -> Result<(), DecodeError> {
    if record.topics.len() != expected {
        return Err(DecodeError::TopicCount {
            expected,
            found: record.topics.len(),
        });
    }
    Ok(())
}

fn indexed_pool_and_user(record: &LogRecord) -> Result<(u64, Address), DecodeError> {
    expect_topics(record, 3)?;
    let pool_id = u64::try_from(U256::from_be_bytes(record.topics[1].0))
        .map_err(|_| DecodeError::PoolIdOutOfRange)?;
    Ok((pool_id, Address::from_word(record.topics[2])))
}

/// The `index`-th 32-byte word of the data section.
fn word(record: &LogRecord, index: usize) -> Result<B256, DecodeError> {
    let start = index * 32;
    let end = start + 32;
    if record.data.len() < end {
        return Err(DecodeError::TruncatedData(record.data.len()));
    }
    Ok(B256::from_slice(&record.data[start..end]))
}

fn data_word(record: &LogRecord, index: usize) -> Result<U256, DecodeError> {
    Ok(U256::from_be_bytes(word(record, index)?.0))
}

/// Decodes an ABI-dynamic `bytes` field whose offset word sits at
/// `offset_word_index`.
fn dynamic_bytes(record: &LogRecord, offset_word_index: usize) -> Result<Bytes, DecodeError> {
    let offset = usize::try_from(data_word(record, offset_word_index)?)
        .map_err(|_| DecodeError::BadDynamicField(offset_word_index * 32))?;
    if record.data.len() < offset + 32 {
        return Err(DecodeError::BadDynamicField(offset));
    }
    let length = usize::try_from(U256::from_be_slice(&record.data[offset..offset + 32]))
        .map_err(|_| DecodeError::BadDynamicField(offset))?;
    let start = offset + 32;
    let end = start
        .checked_add(length)
        .ok_or(DecodeError::BadDynamicField(offset))?;
    if record.data.len() < end {
        return Err(DecodeError::BadDynamicField(offset));
    }
    Ok(Bytes::copy_from_slice(&record.data[start..end]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::hex::FromHex;
    use alloy::primitives::TxHash;

    fn user() -> Address {
        Address::from_hex("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap()
    }

    fn topic_word(value: u64) -> B256 {
        B256::from(U256::from(value))
    }

    fn address_word(address: Address) -> B256 {
        address.into_word()
    }

    fn record(kind: EventKind, topics: Vec<B256>, data: Vec<u8>) -> LogRecord {
        LogRecord {
            block_number: 20_200_000,
            block_timestamp: 1_713_859_200,
            tx_hash: TxHash::ZERO,
            topics: {
                let mut all = vec![kind.topic0()];
                all.extend(topics);
                all
            },
            data: Bytes::from(data),
        }
    }

    #[test]
    fn decodes_user_staked() {
        let amount = U256::from(3u64) * U256::from(10u64).pow(U256::from(18u64));
        let rec = record(
            EventKind::UserStaked,
            vec![topic_word(1), address_word(user())],
            amount.to_be_bytes::<32>().to_vec(),
        );

        let event = decode_log(EventKind::UserStaked, &rec).unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Staked {
                pool_id: 1,
                user: user(),
                amount,
            }
        );
        assert_eq!(event.block_number, 20_200_000);
    }

    #[test]
    fn decodes_user_claimed_with_receiver_in_data() {
        let amount = U256::from(42u64);
        let mut data = address_word(user()).to_vec();
        data.extend_from_slice(&amount.to_be_bytes::<32>());
        let rec = record(
            EventKind::UserClaimed,
            vec![topic_word(0), address_word(user())],
            data,
        );

        let event = decode_log(EventKind::UserClaimed, &rec).unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Claimed {
                pool_id: 0,
                user: user(),
                receiver: user(),
                amount,
            }
        );
    }

    #[test]
    fn decodes_overplus_bridged_dynamic_id() {
        let amount = U256::from(7u64);
        let mut data = Vec::new();
        data.extend_from_slice(&amount.to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(64u64).to_be_bytes::<32>()); // offset
        data.extend_from_slice(&U256::from(3u64).to_be_bytes::<32>()); // length
        data.extend_from_slice(&[0xab, 0xcd, 0xef]);
        data.resize(data.len() + 29, 0); // abi padding
        let rec = record(EventKind::OverplusBridged, vec![], data);

        let event = decode_log(EventKind::OverplusBridged, &rec).unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Bridged {
                amount,
                unique_id: Bytes::from(vec![0xab, 0xcd, 0xef]),
            }
        );
    }

    #[test]
    fn wrong_topic_count_is_malformed() {
        let rec = record(EventKind::UserStaked, vec![topic_word(1)], vec![0u8; 32]);
        assert_eq!(
            decode_log(EventKind::UserStaked, &rec),
            Err(DecodeError::TopicCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn truncated_data_is_malformed() {
        let rec = record(
            EventKind::UserStaked,
            vec![topic_word(1), address_word(user())],
            vec![0u8; 16],
        );
        assert_eq!(
            decode_log(EventKind::UserStaked, &rec),
            Err(DecodeError::TruncatedData(16))
        );
    }

    #[test]
    fn dynamic_field_past_the_end_is_malformed() {
        let mut data = Vec::new();
        data.extend_from_slice(&U256::from(7u64).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(4096u64).to_be_bytes::<32>()); // offset beyond data
        let rec = record(EventKind::OverplusBridged, vec![], data);
        assert!(matches!(
            decode_log(EventKind::OverplusBridged, &rec),
            Err(DecodeError::BadDynamicField(_))
        ));
    }
}
