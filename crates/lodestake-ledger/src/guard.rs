//! Reentrancy protection for ledger operations.
//!
//! A single global lock engaged at operation entry and released on every
//! exit path when the scope drops, error returns included. While an
//! operation holds the lock, any further entry — such as a token
//! capability calling back into the ledger mid-transfer — is rejected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::LedgerError;

/// Single-entry lock over the mutating ledger operations.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyLock {
    engaged: Arc<AtomicBool>,
}

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage the lock for the scope of one operation.
    ///
    /// # Errors
    /// Returns [`LedgerError::ReentrantCall`] if an operation is already
    /// in progress.
    pub fn enter(&self) -> Result<LockScope, LedgerError> {
        if self
            .engaged
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(LedgerError::ReentrantCall);
        }
        Ok(LockScope {
            engaged: Arc::clone(&self.engaged),
        })
    }

    /// Whether an operation is currently in progress.
    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Acquire)
    }
}

/// Scope handle that releases the lock on drop.
#[derive(Debug)]
pub struct LockScope {
    engaged: Arc<AtomicBool>,
}

impl Drop for LockScope {
    fn drop(&mut self) {
        self.engaged.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_release() {
        let lock = ReentrancyLock::new();
        assert!(!lock.is_engaged());

        let scope = lock.enter().unwrap();
        assert!(lock.is_engaged());

        drop(scope);
        assert!(!lock.is_engaged());
    }

    #[test]
    fn test_second_entry_rejected() {
        let lock = ReentrancyLock::new();
        let _scope = lock.enter().unwrap();

        assert_eq!(lock.enter().err(), Some(LedgerError::ReentrantCall));
    }

    #[test]
    fn test_released_on_error_path() {
        let lock = ReentrancyLock::new();

        fn failing_op(lock: &ReentrancyLock) -> Result<(), LedgerError> {
            let _scope = lock.enter()?;
            Err(LedgerError::TransferFailed)
        }

        assert_eq!(failing_op(&lock), Err(LedgerError::TransferFailed));
        assert!(!lock.is_engaged());
        assert!(lock.enter().is_ok());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let lock = ReentrancyLock::new();
        let alias = lock.clone();

        let _scope = lock.enter().unwrap();
        assert!(alias.is_engaged());
        assert_eq!(alias.enter().err(), Some(LedgerError::ReentrantCall));
    }
}
