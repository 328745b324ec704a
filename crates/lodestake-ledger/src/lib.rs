//! Lodestake Ledger - staking ledger state machine.
//!
//! Tracks per-account principal and time-proportional reward accrual for a
//! single staking token. Reward accounting is loop-free: every operation
//! touches one account record plus O(1) aggregate counters, so cost per
//! call is independent of the number of stakers.
//!
//! The ledger depends on two injected capabilities:
//! - a [`token::TokenTransfer`] implementation moving the staked token, and
//! - a timestamp per call (see [`clock::Clock`] for embedder wiring).
//!
//! Operations are synchronous and atomic: each call either commits all of
//! its state changes or rolls back on any failure, including a failed
//! token transfer.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod record;
pub mod service;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use error::{ErrorCategory, LedgerError};
pub use events::{RewardsClaimedEvent, StakedEvent, UnstakedEvent};
pub use guard::{LockScope, ReentrancyLock};
pub use ledger::{ContractStats, StakingInfo, StakingLedger};
pub use record::StakerRecord;
pub use service::StakingService;
pub use token::{InMemoryToken, TokenTransfer};

/// Token amount in base units.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Annual reward rate in basis points (10%).
pub const ANNUAL_RATE_BPS: u128 = 1_000;

/// Denominator for the reward rate.
pub const RATE_PRECISION: u128 = 10_000;

/// Early-unstake penalty in basis points (5%).
pub const EARLY_UNSTAKE_PENALTY_BPS: u128 = 500;

/// Denominator for the penalty rate.
pub const PENALTY_PRECISION: u128 = 10_000;

/// Lock period after stake start before unstaking is penalty-free (7 days).
pub const MINIMUM_LOCK_PERIOD: Timestamp = 7 * 24 * 60 * 60;

/// Accrual denominator: seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;

/// Minimum stake in whole tokens, scaled by token decimals in the config.
pub const MINIMUM_STAKE_TOKENS: u128 = 100;
