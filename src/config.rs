//! Engine configuration with validation.
//!
//! A single `EngineConfig` value is owned by the engine and mutated only
//! through owner-gated setters. Each bound is validated here so the setters
//! and the constructor reject malformed values the same way.

use crate::access::{AccessControl, AccountId};
use crate::errors::{EngineError, EngineResult};
use crate::fixed_point::{BPS_DENOMINATOR, PAYOUT_MULTIPLIER, SCALE};
use serde::{Deserialize, Serialize};

/// Sub-units per whole coin (lamport-style native unit).
pub const UNITS_PER_COIN: u64 = 1_000_000_000;

/// Upper bound on the exposure fraction: 50% of custody.
pub const MAX_EXPOSURE_CEILING: u64 = SCALE / 2;

/// Default minimum stake: 0.001 coin.
pub const DEFAULT_MIN_BET: u64 = 1_000_000;

/// Default exposure fraction: 10% of custody.
pub const DEFAULT_MAX_EXPOSURE_FRACTION: u64 = 10_000_000;

/// Default informational house edge: 1%.
pub const DEFAULT_HOUSE_EDGE_BPS: u32 = 100;

/// Default informational win chance: 50%.
pub const DEFAULT_WIN_CHANCE_BPS: u32 = 5_000;

/// Engine configuration singleton.
///
/// `house_edge_bps` and `win_chance_bps` are display metadata for callers;
/// the actual win probability is the structural digest-mod-2 coin in
/// [`crate::outcome`], and these fields never feed outcome derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub access: AccessControl,
    /// Smallest accepted stake, native units.
    pub min_bet: u64,
    /// `SCALE`-denominated fraction of custody a single payout may risk,
    /// strictly within (0, 50%].
    pub max_exposure_fraction: u64,
    /// Fixed 1.98x winning multiplier, `SCALE`-denominated.
    pub payout_multiplier: u64,
    pub house_edge_bps: u32,
    pub win_chance_bps: u32,
}

impl EngineConfig {
    /// Builds a default-valued config for the given owner and provider.
    pub fn new(owner: AccountId, provider: AccountId) -> EngineResult<Self> {
        Ok(Self {
            access: AccessControl::new(owner, provider)?,
            min_bet: DEFAULT_MIN_BET,
            max_exposure_fraction: DEFAULT_MAX_EXPOSURE_FRACTION,
            payout_multiplier: PAYOUT_MULTIPLIER,
            house_edge_bps: DEFAULT_HOUSE_EDGE_BPS,
            win_chance_bps: DEFAULT_WIN_CHANCE_BPS,
        })
    }

    /// Checks every field bound. Used by tests and by callers constructing a
    /// config literal instead of going through [`EngineConfig::new`].
    pub fn validate(&self) -> EngineResult<()> {
        Self::validate_min_bet(self.min_bet)?;
        Self::validate_exposure_fraction(self.max_exposure_fraction)?;
        Self::validate_house_edge(self.house_edge_bps)?;
        if self.payout_multiplier == 0 {
            return Err(EngineError::InvalidConfigValue {
                field: "payout_multiplier",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    pub fn validate_min_bet(value: u64) -> EngineResult<()> {
        if value == 0 {
            return Err(EngineError::InvalidConfigValue {
                field: "min_bet",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    pub fn validate_exposure_fraction(value: u64) -> EngineResult<()> {
        if value == 0 || value > MAX_EXPOSURE_CEILING {
            return Err(EngineError::InvalidConfigValue {
                field: "max_exposure_fraction",
                reason: "must lie strictly within (0%, 50%]",
            });
        }
        Ok(())
    }

    pub fn validate_house_edge(value: u32) -> EngineResult<()> {
        if value > BPS_DENOMINATOR {
            return Err(EngineError::InvalidConfigValue {
                field: "house_edge_bps",
                reason: "cannot exceed 100%",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::new(AccountId::from_byte(1), AccountId::from_byte(2)).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.payout_multiplier, PAYOUT_MULTIPLIER);
        // Displayed edge matches the structural one:
        // 1 - 0.5 * 1.98 = 0.01 -> 100 bps.
        assert_eq!(config.house_edge_bps, 100);
        assert_eq!(config.win_chance_bps, 5_000);
    }

    #[test]
    fn test_exposure_bounds() {
        assert!(EngineConfig::validate_exposure_fraction(1).is_ok());
        assert!(EngineConfig::validate_exposure_fraction(MAX_EXPOSURE_CEILING).is_ok());
        assert!(EngineConfig::validate_exposure_fraction(0).is_err());
        assert!(EngineConfig::validate_exposure_fraction(MAX_EXPOSURE_CEILING + 1).is_err());
    }

    #[test]
    fn test_min_bet_and_house_edge_bounds() {
        assert!(EngineConfig::validate_min_bet(0).is_err());
        assert!(EngineConfig::validate_min_bet(1).is_ok());
        assert!(EngineConfig::validate_house_edge(BPS_DENOMINATOR).is_ok());
        assert!(EngineConfig::validate_house_edge(BPS_DENOMINATOR + 1).is_err());
    }

    #[test]
    fn test_null_identities_rejected() {
        assert!(EngineConfig::new(AccountId::ZERO, AccountId::from_byte(2)).is_err());
        assert!(EngineConfig::new(AccountId::from_byte(1), AccountId::ZERO).is_err());
    }
}
