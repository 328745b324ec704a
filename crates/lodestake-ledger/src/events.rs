//! Notification payloads for off-chain indexers and observers.
//!
//! Operations return these on success; delivery to external consumers is
//! the embedder's concern.

use borsh::{BorshDeserialize, BorshSerialize};
use lodestake_types::Address;

use crate::{Amount, Timestamp};

/// Emitted when a stake is accepted.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakedEvent {
    pub account: Address,
    /// Principal added, in base units.
    pub amount: Amount,
    pub timestamp: Timestamp,
}

/// Emitted when principal is withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UnstakedEvent {
    pub account: Address,
    /// Principal removed from the stake (before penalty).
    pub amount: Amount,
    /// Portion retained by the contract for unstaking inside the lock
    /// period; zero otherwise.
    pub penalty: Amount,
    pub timestamp: Timestamp,
}

/// Emitted when accumulated rewards are paid out.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RewardsClaimedEvent {
    pub account: Address,
    pub rewards: Amount,
    pub timestamp: Timestamp,
}
