//! Error taxonomy for the wagering engine.
//!
//! Every error leaves engine state untouched: operations validate up front
//! and roll back the single mutation that can fail after the fact
//! (see `WageringEngine::resolve_bet`).

use crate::registry::RequestId;
use thiserror::Error;

/// Engine error kinds. Each maps to a full rollback of the enclosing
/// operation; the engine never retries internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The zero account was supplied where a privileged identity is required.
    #[error("invalid address: the zero account cannot hold the {0} role")]
    InvalidAddress(&'static str),

    /// Caller does not hold the required role.
    #[error("unauthorized: caller is not the {0}")]
    Unauthorized(&'static str),

    /// Stake below the configured minimum.
    #[error("amount below minimum: stake {stake} < min bet {min_bet}")]
    BetBelowMinimum { stake: u64, min_bet: u64 },

    /// Potential payout would exceed the exposure cap.
    #[error("exceeds max reward limit: potential payout {payout} > cap {cap}")]
    BetExceedsMaxReward { payout: u64, cap: u64 },

    /// Withdrawal or payout larger than the custodied funds.
    #[error("insufficient custody balance: requested {requested}, available {available}")]
    InsufficientCustodyBalance { requested: u64, available: u64 },

    /// Degenerate amount supplied to a fund operation.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Malformed administrative setter input.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfigValue {
        field: &'static str,
        reason: &'static str,
    },

    /// Resolution attempted for a request id that was never issued or was
    /// already resolved.
    #[error("unknown or already resolved request: {0}")]
    UnknownOrReplayedRequest(RequestId),
}

/// Convenience alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_reason() {
        let err = EngineError::BetBelowMinimum {
            stake: 100,
            min_bet: 1_000,
        };
        assert!(err.to_string().contains("amount below minimum"));

        let err = EngineError::BetExceedsMaxReward {
            payout: 198,
            cap: 100,
        };
        assert!(err.to_string().contains("exceeds max reward limit"));
    }

    #[test]
    fn test_replay_error_names_request() {
        let err = EngineError::UnknownOrReplayedRequest(7);
        assert!(err.to_string().contains('7'));
    }
}
