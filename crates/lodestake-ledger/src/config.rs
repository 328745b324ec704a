use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Timestamp, ANNUAL_RATE_BPS, EARLY_UNSTAKE_PENALTY_BPS, MINIMUM_LOCK_PERIOD,
    MINIMUM_STAKE_TOKENS,
};

/// Configuration for a staking ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LedgerConfig {
    /// Minimum stake per call, in base units of the staking token.
    pub minimum_stake: Amount,
    /// Seconds after stake start before unstaking is penalty-free.
    pub lock_period: Timestamp,
    /// Annual reward rate in basis points.
    pub annual_rate_bps: u128,
    /// Early-unstake penalty in basis points.
    pub penalty_bps: u128,
}

impl LedgerConfig {
    /// Protocol defaults for a staking token with the given decimals.
    pub fn for_decimals(decimals: u8) -> Self {
        Self {
            minimum_stake: MINIMUM_STAKE_TOKENS * 10u128.pow(decimals as u32),
            lock_period: MINIMUM_LOCK_PERIOD,
            annual_rate_bps: ANNUAL_RATE_BPS,
            penalty_bps: EARLY_UNSTAKE_PENALTY_BPS,
        }
    }
}

impl Default for LedgerConfig {
    /// Defaults for an 18-decimal token.
    fn default() -> Self {
        Self::for_decimals(18)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.minimum_stake, 100 * 10u128.pow(18));
        assert_eq!(config.lock_period, 7 * 24 * 60 * 60);
        assert_eq!(config.annual_rate_bps, 1_000);
        assert_eq!(config.penalty_bps, 500);
    }

    #[test]
    fn test_minimum_scales_with_decimals() {
        assert_eq!(LedgerConfig::for_decimals(0).minimum_stake, 100);
        assert_eq!(LedgerConfig::for_decimals(6).minimum_stake, 100_000_000);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LedgerConfig::for_decimals(9);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
