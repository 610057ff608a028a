use alloy::primitives::{Address, Bytes, U256};

/// Kind-specific event fields, resolved once when the log is decoded.
///
/// Each variant mirrors the argument list of the corresponding contract
/// event; amounts are raw 18-decimal integer units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventPayload {
    Staked {
        pool_id: u64,
        user: Address,
        amount: U256,
    },
    Withdrawn {
        pool_id: u64,
        user: Address,
        amount: U256,
    },
    Claimed {
        pool_id: u64,
        user: Address,
        receiver: Address,
        amount: U256,
    },
    Bridged {
        amount: U256,
        unique_id: Bytes,
    },
}

impl EventPayload {
    /// Raw on-chain amount carried by the event.
    pub fn amount(&self) -> U256 {
        match self {
            EventPayload::Staked { amount, .. }
            | EventPayload::Withdrawn { amount, .. }
            | EventPayload::Claimed { amount, .. }
            | EventPayload::Bridged { amount, .. } => *amount,
        }
    }

    /// Pool the event belongs to, if the event is pool-scoped.
    pub fn pool_id(&self) -> Option<u64> {
        match self {
            EventPayload::Staked { pool_id, .. }
            | EventPayload::Withdrawn { pool_id, .. }
            | EventPayload::Claimed { pool_id, .. } => Some(*pool_id),
            EventPayload::Bridged { .. } => None,
        }
    }
}
