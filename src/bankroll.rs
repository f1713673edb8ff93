//! Custody ledger and risk limits.
//!
//! `custody_balance` is the engine's own accounting of the funds it is liable
//! for. It changes only through deposit, bet escrow, payout, and withdrawal.
//! The actual balance tracks everything physically held, including funds that
//! arrived outside the tracked operations, and exists for reconciliation.

use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::fixed_point::{div_scaled, mul_scaled};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a bet was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetRejection {
    BelowMinimum,
    ExceedsMaxReward,
}

impl BetRejection {
    /// Caller-facing reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            BetRejection::BelowMinimum => "amount below minimum",
            BetRejection::ExceedsMaxReward => "exceeds max reward limit",
        }
    }
}

impl fmt::Display for BetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Tagged validity result for a prospective bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetCheck {
    pub allowed: bool,
    pub reason: Option<BetRejection>,
}

impl BetCheck {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn rejected(reason: BetRejection) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Single authoritative balance plus derived risk limits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BankrollLedger {
    custody_balance: u64,
    actual_balance: u64,
}

impl BankrollLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Internal accounting of custodied funds.
    pub fn custody_balance(&self) -> u64 {
        self.custody_balance
    }

    /// Raw balance, including untracked arrivals. Equals the custody balance
    /// unless funds were forced in outside the tracked operations.
    pub fn actual_balance(&self) -> u64 {
        self.actual_balance
    }

    /// Tracked inflow: deposit, escrow, or owner direct transfer.
    pub fn credit(&mut self, amount: u64) {
        self.custody_balance += amount;
        self.actual_balance += amount;
    }

    /// Tracked outflow: payout or withdrawal. Fails without effect when the
    /// custody balance cannot cover `amount`.
    pub fn debit(&mut self, amount: u64) -> EngineResult<()> {
        if amount > self.custody_balance {
            return Err(EngineError::InsufficientCustodyBalance {
                requested: amount,
                available: self.custody_balance,
            });
        }
        self.custody_balance -= amount;
        self.actual_balance = self.actual_balance.saturating_sub(amount);
        Ok(())
    }

    /// Drains the entire custody balance; returns the amount withdrawn.
    pub fn drain(&mut self) -> u64 {
        let amount = self.custody_balance;
        self.custody_balance = 0;
        self.actual_balance = self.actual_balance.saturating_sub(amount);
        amount
    }

    /// Funds that arrived without going through a tracked operation. They
    /// raise the actual balance only; custody never moves outside the
    /// deposit/escrow/payout/withdraw set.
    pub fn credit_untracked(&mut self, amount: u64) {
        self.actual_balance += amount;
    }

    /// Largest payout a single bet may put at risk:
    /// `custody_balance * max_exposure_fraction`, floored.
    pub fn max_allowed_payout(&self, config: &EngineConfig) -> u64 {
        mul_scaled(self.custody_balance, config.max_exposure_fraction)
    }

    /// Largest stake whose potential payout stays under the exposure cap.
    /// Zero when custody is empty.
    pub fn max_bet(&self, config: &EngineConfig) -> u64 {
        div_scaled(self.max_allowed_payout(config), config.payout_multiplier)
    }

    /// Validates a prospective stake against the minimum and the exposure
    /// cap, evaluated on the current (pre-escrow) custody balance.
    pub fn can_place_bet(&self, config: &EngineConfig, stake: u64) -> BetCheck {
        if stake < config.min_bet {
            return BetCheck::rejected(BetRejection::BelowMinimum);
        }
        let potential_payout = mul_scaled(stake, config.payout_multiplier);
        if potential_payout > self.max_allowed_payout(config) {
            return BetCheck::rejected(BetRejection::ExceedsMaxReward);
        }
        BetCheck::allowed()
    }
}
