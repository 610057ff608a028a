use alloy::primitives::{B256, keccak256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The contract events tracked by the indexer.
///
/// Each kind maps to one Solidity event on the distribution contract and to
/// one persisted daily series. `UserStaked` and `UserWithdrawn` are split per
/// pool; `UserClaimed` (circulating supply) and `OverplusBridged` are global.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    UserStaked,
    UserWithdrawn,
    UserClaimed,
    OverplusBridged,
}

impl EventKind {
    /// Every kind, in the order the pipeline processes them.
    pub const ALL: [EventKind; 4] = [
        EventKind::UserStaked,
        EventKind::UserWithdrawn,
        EventKind::UserClaimed,
        EventKind::OverplusBridged,
    ];

    /// Stable identifier used as the series key in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserStaked => "user_staked",
            EventKind::UserWithdrawn => "user_withdrawn",
            EventKind::UserClaimed => "user_claimed",
            EventKind::OverplusBridged => "overplus_bridged",
        }
    }

    /// The Solidity event signature this kind is decoded from.
    pub fn signature(&self) -> &'static str {
        match self {
            EventKind::UserStaked => "UserStaked(uint256,address,uint256)",
            EventKind::UserWithdrawn => "UserWithdrawn(uint256,address,uint256)",
            EventKind::UserClaimed => "UserClaimed(uint256,address,address,uint256)",
            EventKind::OverplusBridged => "OverplusBridged(uint256,bytes)",
        }
    }

    /// `topic0` value for log filtering.
    pub fn topic0(&self) -> B256 {
        keccak256(self.signature().as_bytes())
    }

    /// Whether the daily series for this kind is keyed per pool.
    pub fn pool_keyed(&self) -> bool {
        matches!(self, EventKind::UserStaked | EventKind::UserWithdrawn)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
