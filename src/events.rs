//! Emitted records.
//!
//! Every state mutation appends one of these to the engine's event log. The
//! log is what external read layers (UI, admin tooling) consume; the engine
//! itself never reads it back.

use crate::access::AccountId;
use crate::outcome::CoinSide;
use crate::registry::RequestId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A bet was validated and escrowed; an outcome is now awaited.
    BetCommitted {
        player: AccountId,
        stake: u64,
        choice: CoinSide,
        request_id: RequestId,
    },
    /// An outcome request was issued to the randomness provider.
    OutcomeRequested { request_id: RequestId },
    /// A bet was settled.
    BetRevealed {
        player: AccountId,
        stake: u64,
        choice: CoinSide,
        result: CoinSide,
        did_win: bool,
        payout: u64,
        request_id: RequestId,
    },
    OwnershipTransferred {
        old: AccountId,
        new: AccountId,
    },
    ProviderChanged {
        old: AccountId,
        new: AccountId,
    },
    MinBetUpdated {
        old: u64,
        new: u64,
    },
    MaxExposureUpdated {
        old: u64,
        new: u64,
    },
    HouseEdgeUpdated {
        old: u32,
        new: u32,
    },
    FundsDeposited {
        depositor: AccountId,
        amount: u64,
    },
    FundsWithdrawn {
        recipient: AccountId,
        amount: u64,
    },
    EmergencyWithdrawal {
        recipient: AccountId,
        amount: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_tagged() {
        let event = EngineEvent::BetCommitted {
            player: AccountId::from_byte(3),
            stake: 100_000_000,
            choice: CoinSide::Heads,
            request_id: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "bet_committed");
        assert_eq!(json["choice"], "heads");
        assert_eq!(json["request_id"], 1);

        let back: EngineEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
