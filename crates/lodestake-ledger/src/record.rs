//! Per-account staking records and reward accrual.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::LedgerError;
use crate::{Amount, Timestamp, RATE_PRECISION, SECONDS_PER_YEAR};

/// One account's staking record.
///
/// Created zeroed on first use and never deleted: a full withdrawal only
/// resets the record to the inactive state, keeping any rewards that were
/// already accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakerRecord {
    /// Current principal.
    pub staked_amount: Amount,
    /// Set on the first stake after the record was inactive; top-ups do
    /// not reset it.
    pub staking_start_time: Timestamp,
    /// Point up to which rewards have been folded into
    /// `accumulated_rewards`. Monotone non-decreasing, never ahead of now.
    pub last_reward_calc_time: Timestamp,
    /// Rewards computed but not yet paid out.
    pub accumulated_rewards: Amount,
    /// True while `staked_amount > 0`.
    pub is_active: bool,
}

/// Reward owed for `staked` principal held over `elapsed` seconds.
///
/// Floor division: the sub-unit remainder is dropped, never carried over.
fn accrual(staked: Amount, annual_rate_bps: u128, elapsed: u64) -> Result<Amount, LedgerError> {
    staked
        .checked_mul(annual_rate_bps)
        .and_then(|v| v.checked_mul(elapsed as u128))
        .map(|v| v / (RATE_PRECISION * SECONDS_PER_YEAR))
        .ok_or(LedgerError::Overflow)
}

impl StakerRecord {
    /// Seconds since the last reward calculation, clamped at zero so a
    /// coarse clock stepping backwards cannot rewind the record.
    fn elapsed_since_calc(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.last_reward_calc_time)
    }

    /// Fold pending accrual into `accumulated_rewards` up to `now`.
    ///
    /// Must run before any mutation of `staked_amount` and before any
    /// state-affecting read of `accumulated_rewards`, so the elapsed
    /// period is always priced against the principal that was actually
    /// held for it. Returns the newly accrued amount.
    pub fn materialize_rewards(
        &mut self,
        now: Timestamp,
        annual_rate_bps: u128,
    ) -> Result<Amount, LedgerError> {
        if !self.is_active || self.staked_amount == 0 {
            return Ok(0);
        }
        let elapsed = self.elapsed_since_calc(now);
        if elapsed == 0 {
            return Ok(0);
        }
        let accrued = accrual(self.staked_amount, annual_rate_bps, elapsed)?;
        self.accumulated_rewards = self
            .accumulated_rewards
            .checked_add(accrued)
            .ok_or(LedgerError::Overflow)?;
        self.last_reward_calc_time = now;
        Ok(accrued)
    }

    /// Rewards the record would hold after materializing at `now`, without
    /// mutating anything. Numerically identical to what
    /// [`materialize_rewards`](Self::materialize_rewards) would leave in
    /// `accumulated_rewards` at the same timestamp.
    pub fn pending_rewards(
        &self,
        now: Timestamp,
        annual_rate_bps: u128,
    ) -> Result<Amount, LedgerError> {
        if !self.is_active || self.staked_amount == 0 {
            return Ok(self.accumulated_rewards);
        }
        let accrued = accrual(self.staked_amount, annual_rate_bps, self.elapsed_since_calc(now))?;
        self.accumulated_rewards
            .checked_add(accrued)
            .ok_or(LedgerError::Overflow)
    }
}
