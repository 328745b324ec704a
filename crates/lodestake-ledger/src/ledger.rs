//! The staking ledger aggregate and its operations.

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};
use lodestake_types::Address;
use tracing::{info, warn};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::events::{RewardsClaimedEvent, StakedEvent, UnstakedEvent};
use crate::guard::ReentrancyLock;
use crate::record::StakerRecord;
use crate::token::TokenTransfer;
use crate::{Amount, Timestamp, PENALTY_PRECISION};

/// Read-only view of one account's staking position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakingInfo {
    pub staked_amount: Amount,
    /// Accumulated rewards plus the not-yet-materialized accrual.
    pub pending_rewards: Amount,
    pub staking_start_time: Timestamp,
    pub is_active: bool,
}

/// Aggregate contract statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractStats {
    pub total_staked: Amount,
    pub total_rewards_distributed: Amount,
    pub contract_token_balance: Amount,
}

/// Staking ledger state.
///
/// Every operation touches a single account record plus the scalar
/// aggregates; the staker map is never iterated on an operation path, so
/// per-call cost is independent of the number of stakers.
///
/// Operations take the token capability and the current time as explicit
/// inputs and either commit fully or leave no trace: a failed outbound
/// transfer restores the pre-operation record and aggregates.
#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub struct StakingLedger {
    /// Per-account records. Created zeroed on first stake, never removed.
    records: HashMap<Address, StakerRecord>,
    /// Sum of `staked_amount` over all active records.
    total_staked: Amount,
    /// Cumulative rewards ever paid out. Monotone non-decreasing.
    total_rewards_distributed: Amount,
    /// Gate on the non-admin mutating operations.
    paused: bool,
    /// Privileged identity for admin operations.
    owner: Address,
    /// Identity this ledger holds token balances under.
    contract_address: Address,
    /// The staked token; shielded from emergency recovery.
    staking_token: Address,
    config: LedgerConfig,
    #[borsh(skip)]
    lock: ReentrancyLock,
}

impl StakingLedger {
    pub fn new(
        owner: Address,
        contract_address: Address,
        staking_token: Address,
        config: LedgerConfig,
    ) -> Self {
        Self {
            records: HashMap::new(),
            total_staked: 0,
            total_rewards_distributed: 0,
            paused: false,
            owner,
            contract_address,
            staking_token,
            config,
            lock: ReentrancyLock::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn staking_token(&self) -> Address {
        self.staking_token
    }

    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    pub fn total_rewards_distributed(&self) -> Amount {
        self.total_rewards_distributed
    }

    /// Stake `amount` for `account`, pulling the principal in via `token`.
    ///
    /// The first stake of an inactive record starts its lock period;
    /// top-ups keep the original start time and materialize the pending
    /// accrual first, so the elapsed period is priced against the old
    /// principal.
    pub fn stake(
        &mut self,
        token: &mut dyn TokenTransfer,
        account: Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<StakedEvent, LedgerError> {
        let _entry = self.lock.enter()?;
        self.ensure_running()?;
        if amount < self.config.minimum_stake {
            return Err(LedgerError::BelowMinimumStake {
                minimum: self.config.minimum_stake,
                amount,
            });
        }
        debug_assert_eq!(token.token(), self.staking_token);

        // Work out the post-stake record before moving any tokens, so an
        // arithmetic rejection leaves nothing to unwind.
        let mut record = self.records.get(&account).cloned().unwrap_or_default();
        if record.is_active {
            record.materialize_rewards(now, self.config.annual_rate_bps)?;
            record.staked_amount = record
                .staked_amount
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?;
        } else {
            record.staked_amount = amount;
            record.staking_start_time = now;
            record.last_reward_calc_time = now;
            record.is_active = true;
        }
        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // Pull the principal in; a failed pull leaves the ledger untouched.
        if !token.transfer(account, self.contract_address, amount) {
            return Err(LedgerError::TransferFailed);
        }

        self.records.insert(account, record);
        self.total_staked = new_total;

        info!(account = %account, amount, now, "stake accepted");
        Ok(StakedEvent {
            account,
            amount,
            timestamp: now,
        })
    }

    /// Withdraw `amount` of principal for `account`.
    ///
    /// Unstaking before the lock period elapses forfeits a penalty cut of
    /// the withdrawn amount; the cut stays in the contract's token
    /// balance. Withdrawing the full principal deactivates the record but
    /// keeps its accumulated rewards.
    pub fn unstake(
        &mut self,
        token: &mut dyn TokenTransfer,
        account: Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<UnstakedEvent, LedgerError> {
        let _entry = self.lock.enter()?;
        self.ensure_running()?;
        debug_assert_eq!(token.token(), self.staking_token);
        let annual_rate_bps = self.config.annual_rate_bps;
        let lock_period = self.config.lock_period;
        let penalty_bps = self.config.penalty_bps;

        let record = self
            .records
            .get_mut(&account)
            .filter(|r| r.is_active)
            .ok_or(LedgerError::NotStaking)?;
        if amount > record.staked_amount {
            return Err(LedgerError::ExceedsStakedBalance {
                staked: record.staked_amount,
                requested: amount,
            });
        }
        let snapshot = record.clone();

        // Price the elapsed period against the principal that was held
        // for it, before that principal changes.
        record.materialize_rewards(now, annual_rate_bps)?;

        let penalty = if now < record.staking_start_time.saturating_add(lock_period) {
            amount.checked_mul(penalty_bps).ok_or(LedgerError::Overflow)? / PENALTY_PRECISION
        } else {
            0
        };
        let payout = amount.checked_sub(penalty).ok_or(LedgerError::Underflow)?;

        record.staked_amount -= amount;
        if record.staked_amount == 0 {
            // Deactivate but keep accumulated_rewards; the record survives
            // a full exit.
            record.is_active = false;
        }
        let prev_total = self.total_staked;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(LedgerError::Underflow)?;

        // State is final before the external call; the held entry lock
        // rejects any callback into the ledger mid-transfer.
        if !token.transfer(self.contract_address, account, payout) {
            self.records.insert(account, snapshot);
            self.total_staked = prev_total;
            return Err(LedgerError::TransferFailed);
        }

        info!(account = %account, amount, penalty, now, "unstake settled");
        Ok(UnstakedEvent {
            account,
            amount,
            penalty,
            timestamp: now,
        })
    }

    /// Pay out all pending rewards for `account` and zero the bucket.
    pub fn claim_rewards(
        &mut self,
        token: &mut dyn TokenTransfer,
        account: Address,
        now: Timestamp,
    ) -> Result<RewardsClaimedEvent, LedgerError> {
        let _entry = self.lock.enter()?;
        self.ensure_running()?;
        debug_assert_eq!(token.token(), self.staking_token);
        let annual_rate_bps = self.config.annual_rate_bps;

        let record = self
            .records
            .get_mut(&account)
            .filter(|r| r.is_active)
            .ok_or(LedgerError::NotStaking)?;

        // Project first: a nothing-to-claim rejection must not consume
        // the accrual period.
        let rewards = record.pending_rewards(now, annual_rate_bps)?;
        if rewards == 0 {
            return Err(LedgerError::NothingToClaim);
        }
        let snapshot = record.clone();

        record.materialize_rewards(now, annual_rate_bps)?;
        debug_assert_eq!(record.accumulated_rewards, rewards);
        record.accumulated_rewards = 0;

        let prev_distributed = self.total_rewards_distributed;
        self.total_rewards_distributed = self
            .total_rewards_distributed
            .checked_add(rewards)
            .ok_or(LedgerError::Overflow)?;

        if !token.transfer(self.contract_address, account, rewards) {
            self.records.insert(account, snapshot);
            self.total_rewards_distributed = prev_distributed;
            return Err(LedgerError::TransferFailed);
        }

        info!(account = %account, rewards, now, "rewards claimed");
        Ok(RewardsClaimedEvent {
            account,
            rewards,
            timestamp: now,
        })
    }

    /// Read-only view of `account` at `now`.
    ///
    /// Computes pending rewards as a projection, numerically identical to
    /// what a materializing operation would see at the same timestamp.
    /// Unknown accounts read as zeroed records without being inserted.
    pub fn staking_info(&self, account: Address, now: Timestamp) -> Result<StakingInfo, LedgerError> {
        let record = self.records.get(&account).cloned().unwrap_or_default();
        Ok(StakingInfo {
            staked_amount: record.staked_amount,
            pending_rewards: record.pending_rewards(now, self.config.annual_rate_bps)?,
            staking_start_time: record.staking_start_time,
            is_active: record.is_active,
        })
    }

    /// Aggregate statistics, including the contract's own token balance.
    pub fn contract_stats(&self, token: &dyn TokenTransfer) -> ContractStats {
        ContractStats {
            total_staked: self.total_staked,
            total_rewards_distributed: self.total_rewards_distributed,
            contract_token_balance: token.balance_of(self.contract_address),
        }
    }

    /// Halt the user-facing mutating operations. Owner only. Queries and
    /// admin paths stay available.
    pub fn pause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_owner(caller)?;
        self.paused = true;
        warn!(owner = %caller, "ledger paused");
        Ok(())
    }

    /// Reopen the user-facing mutating operations. Owner only.
    pub fn unpause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_owner(caller)?;
        self.paused = false;
        info!(owner = %caller, "ledger unpaused");
        Ok(())
    }

    /// Move stray holdings of a foreign token out to the owner.
    ///
    /// The staking token itself is never recoverable this way: user
    /// principal and unclaimed rewards stay put regardless of amount.
    pub fn emergency_recover(
        &mut self,
        token: &mut dyn TokenTransfer,
        caller: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let _entry = self.lock.enter()?;
        self.ensure_owner(caller)?;
        if token.token() == self.staking_token {
            return Err(LedgerError::CannotRecoverStakingToken);
        }
        if !token.transfer(self.contract_address, self.owner, amount) {
            return Err(LedgerError::TransferFailed);
        }

        warn!(owner = %caller, token = %token.token(), amount, "emergency recovery");
        Ok(())
    }

    /// Audit helper: recompute Σ `staked_amount` over active records.
    /// Linear scan; not used by any operation path.
    pub fn audit_total_staked(&self) -> Amount {
        self.records
            .values()
            .filter(|r| r.is_active)
            .map(|r| r.staked_amount)
            .sum()
    }

    fn ensure_running(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::LedgerPaused);
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotOwner);
        }
        Ok(())
    }
}
