//! Embedding wrapper serializing ledger operations.
//!
//! [`StakingService`] owns the ledger, its token capability, and a clock,
//! behind one mutex: operations execute one at a time to completion, so no
//! two mutating calls interleave and queries only ever observe committed
//! state. Retries and timeouts remain caller concerns.

use lodestake_types::Address;
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::error::LedgerError;
use crate::events::{RewardsClaimedEvent, StakedEvent, UnstakedEvent};
use crate::ledger::{ContractStats, StakingInfo, StakingLedger};
use crate::token::TokenTransfer;
use crate::Amount;

/// Thread-safe front over a [`StakingLedger`] and its token capability.
pub struct StakingService<T, C> {
    inner: Mutex<Inner<T>>,
    clock: C,
}

struct Inner<T> {
    ledger: StakingLedger,
    token: T,
}

impl<T: TokenTransfer, C: Clock> StakingService<T, C> {
    pub fn new(ledger: StakingLedger, token: T, clock: C) -> Self {
        Self {
            inner: Mutex::new(Inner { ledger, token }),
            clock,
        }
    }

    pub fn stake(&self, account: Address, amount: Amount) -> Result<StakedEvent, LedgerError> {
        let now = self.clock.now();
        let inner = &mut *self.inner.lock();
        inner.ledger.stake(&mut inner.token, account, amount, now)
    }

    pub fn unstake(&self, account: Address, amount: Amount) -> Result<UnstakedEvent, LedgerError> {
        let now = self.clock.now();
        let inner = &mut *self.inner.lock();
        inner.ledger.unstake(&mut inner.token, account, amount, now)
    }

    pub fn claim_rewards(&self, account: Address) -> Result<RewardsClaimedEvent, LedgerError> {
        let now = self.clock.now();
        let inner = &mut *self.inner.lock();
        inner.ledger.claim_rewards(&mut inner.token, account, now)
    }

    pub fn staking_info(&self, account: Address) -> Result<StakingInfo, LedgerError> {
        let now = self.clock.now();
        self.inner.lock().ledger.staking_info(account, now)
    }

    pub fn contract_stats(&self) -> ContractStats {
        let inner = self.inner.lock();
        inner.ledger.contract_stats(&inner.token)
    }

    pub fn pause(&self, caller: Address) -> Result<(), LedgerError> {
        self.inner.lock().ledger.pause(caller)
    }

    pub fn unpause(&self, caller: Address) -> Result<(), LedgerError> {
        self.inner.lock().ledger.unpause(caller)
    }

    /// Recover stray holdings of a foreign token; the staking token the
    /// service itself holds is rejected by the ledger.
    pub fn emergency_recover(
        &self,
        foreign: &mut dyn TokenTransfer,
        caller: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.inner
            .lock()
            .ledger
            .emergency_recover(foreign, caller, amount)
    }

    /// Run `f` against the locked ledger and token.
    pub fn with_state<R>(&self, f: impl FnOnce(&StakingLedger, &T) -> R) -> R {
        let inner = self.inner.lock();
        f(&inner.ledger, &inner.token)
    }

    /// Mutable access to the token capability (funding, test hooks).
    pub fn with_token<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock().token)
    }
}
