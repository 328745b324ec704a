//! Token-transfer capability.
//!
//! The ledger never touches token balances directly; it is handed an
//! implementation of [`TokenTransfer`] per call. Any `false` return from a
//! transfer is fatal to the enclosing operation, which rolls back in full.

use std::collections::HashMap;

use lodestake_types::Address;

use crate::Amount;

/// Transfer surface of a fungible token.
pub trait TokenTransfer {
    /// Address identifying the token this capability moves.
    fn token(&self) -> Address;

    /// Move `amount` from `from` to `to`. Returns `false` on any failure.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> bool;

    /// Current balance of `address`.
    fn balance_of(&self, address: Address) -> Amount;
}

/// In-memory token bank implementing [`TokenTransfer`].
///
/// Reference implementation backing the test suites and embedding demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToken {
    token: Address,
    balances: HashMap<Address, Amount>,
    /// When set, every transfer fails; used to exercise rollback paths.
    fail_transfers: bool,
}

impl InMemoryToken {
    pub fn new(token: Address) -> Self {
        Self {
            token,
            balances: HashMap::new(),
            fail_transfers: false,
        }
    }

    /// Credit `amount` to `address` out of thin air.
    pub fn mint(&mut self, address: Address, amount: Amount) {
        let balance = self.balances.entry(address).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Force every subsequent transfer to fail.
    pub fn fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl TokenTransfer for InMemoryToken {
    fn token(&self) -> Address {
        self.token
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> bool {
        if self.fail_transfers {
            return false;
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return false;
        }

        // Drop zero balances to keep the map small.
        if from_balance == amount {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, from_balance - amount);
        }
        *self.balances.entry(to).or_default() += amount;
        true
    }

    fn balance_of(&self, address: Address) -> Amount {
        self.balances.get(&address).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut token = InMemoryToken::new(addr(1));
        token.mint(addr(2), 1_000);

        assert!(token.transfer(addr(2), addr(3), 400));
        assert_eq!(token.balance_of(addr(2)), 600);
        assert_eq!(token.balance_of(addr(3)), 400);
    }

    #[test]
    fn test_insufficient_balance_fails_cleanly() {
        let mut token = InMemoryToken::new(addr(1));
        token.mint(addr(2), 100);

        assert!(!token.transfer(addr(2), addr(3), 101));
        assert_eq!(token.balance_of(addr(2)), 100);
        assert_eq!(token.balance_of(addr(3)), 0);
    }

    #[test]
    fn test_forced_failure() {
        let mut token = InMemoryToken::new(addr(1));
        token.mint(addr(2), 100);

        token.fail_transfers(true);
        assert!(!token.transfer(addr(2), addr(3), 10));

        token.fail_transfers(false);
        assert!(token.transfer(addr(2), addr(3), 10));
    }

    #[test]
    fn test_zero_balance_entries_are_pruned() {
        let mut token = InMemoryToken::new(addr(1));
        token.mint(addr(2), 50);

        assert!(token.transfer(addr(2), addr(3), 50));
        assert_eq!(token.balance_of(addr(2)), 0);
        assert!(!token.balances.contains_key(&addr(2)));
    }
}
