use thiserror::Error;

use crate::Amount;

/// Errors returned by ledger operations.
///
/// Every rejection carries a distinct variant so callers can branch on the
/// exact reason; [`LedgerError::category`] gives the coarse class.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Stake below minimum: minimum {minimum}, got {amount}")]
    BelowMinimumStake { minimum: Amount, amount: Amount },

    #[error("Unstake exceeds staked balance: staked {staked}, requested {requested}")]
    ExceedsStakedBalance { staked: Amount, requested: Amount },

    #[error("No rewards to claim")]
    NothingToClaim,

    #[error("Account has no active stake")]
    NotStaking,

    #[error("Ledger is paused")]
    LedgerPaused,

    #[error("Caller is not the owner")]
    NotOwner,

    #[error("Cannot recover the staking token")]
    CannotRecoverStakingToken,

    #[error("Token transfer failed")]
    TransferFailed,

    #[error("Reentrant call rejected")]
    ReentrantCall,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Arithmetic underflow")]
    Underflow,
}

/// Coarse classification of rejections, for callers that branch on the
/// failure class rather than the exact reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input; rejected before any mutation.
    Validation,
    /// Caller lacks the required privilege.
    Authorization,
    /// Operation not permitted in the current ledger or account state.
    State,
    /// The external token transfer reported failure; the operation rolled
    /// back in full.
    Transfer,
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BelowMinimumStake { .. }
            | Self::ExceedsStakedBalance { .. }
            | Self::NothingToClaim
            | Self::CannotRecoverStakingToken
            | Self::Overflow
            | Self::Underflow => ErrorCategory::Validation,
            Self::NotOwner => ErrorCategory::Authorization,
            Self::NotStaking | Self::LedgerPaused | Self::ReentrantCall => ErrorCategory::State,
            Self::TransferFailed => ErrorCategory::Transfer,
        }
    }
}
