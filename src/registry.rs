//! Registry of in-flight bets.
//!
//! Maps outstanding request ids to their escrowed bets and is the single
//! source of truth for "is this request still open". Removal via
//! [`PendingFlipRegistry::take`] is the sole serialization point for
//! resolution: a request id can be taken at most once, which is what makes
//! settlement exactly-once.

use crate::access::AccountId;
use crate::errors::{EngineError, EngineResult};
use crate::outcome::CoinSide;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Correlation key between a committed bet and its eventual resolution.
/// Monotonically issued, never reused.
pub type RequestId = u64;

/// One in-flight bet. The stake has already been escrowed into custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFlip {
    pub request_id: RequestId,
    pub player: AccountId,
    pub stake: u64,
    pub choice: CoinSide,
}

/// Owned exclusively by the engine; operations run behind `&mut self`, so
/// check-then-act on an entry is atomic with respect to every other engine
/// operation.
#[derive(Debug, Default)]
pub struct PendingFlipRegistry {
    next_request_id: RequestId,
    pending: HashMap<RequestId, PendingFlip>,
}

impl PendingFlipRegistry {
    pub fn new() -> Self {
        Self {
            // Id 0 is never issued, so it can stand in for "no request".
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Records a committed bet under a fresh request id.
    pub fn commit(&mut self, player: AccountId, stake: u64, choice: CoinSide) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.insert(
            request_id,
            PendingFlip {
                request_id,
                player,
                stake,
                choice,
            },
        );
        request_id
    }

    /// Removes and returns the entry for `request_id`. Fails for ids that
    /// were never issued or were already taken; a taken id cannot be taken
    /// again, enforcing at-most-once resolution.
    pub fn take(&mut self, request_id: RequestId) -> EngineResult<PendingFlip> {
        self.pending
            .remove(&request_id)
            .ok_or(EngineError::UnknownOrReplayedRequest(request_id))
    }

    /// Re-inserts an entry removed by [`take`](Self::take). Rollback path for
    /// a resolution that failed after removal; never called otherwise.
    pub fn restore(&mut self, flip: PendingFlip) {
        self.pending.insert(flip.request_id, flip);
    }

    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.pending.contains_key(&request_id)
    }

    pub fn open_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> AccountId {
        AccountId::from_byte(5)
    }

    #[test]
    fn test_commit_issues_monotonic_ids() {
        let mut registry = PendingFlipRegistry::new();
        let a = registry.commit(player(), 100, CoinSide::Heads);
        let b = registry.commit(player(), 200, CoinSide::Tails);
        assert!(b > a);
        assert_eq!(registry.open_count(), 2);
    }

    #[test]
    fn test_take_is_at_most_once() {
        let mut registry = PendingFlipRegistry::new();
        let id = registry.commit(player(), 100, CoinSide::Heads);

        let flip = registry.take(id).unwrap();
        assert_eq!(flip.stake, 100);
        assert_eq!(flip.choice, CoinSide::Heads);
        assert!(!registry.is_pending(id));

        // Second take is a replay.
        assert_eq!(
            registry.take(id),
            Err(EngineError::UnknownOrReplayedRequest(id))
        );
    }

    #[test]
    fn test_take_unknown_id() {
        let mut registry = PendingFlipRegistry::new();
        assert_eq!(
            registry.take(999),
            Err(EngineError::UnknownOrReplayedRequest(999))
        );
    }

    #[test]
    fn test_taken_ids_are_never_reissued() {
        let mut registry = PendingFlipRegistry::new();
        let a = registry.commit(player(), 100, CoinSide::Heads);
        registry.take(a).unwrap();
        let b = registry.commit(player(), 100, CoinSide::Heads);
        assert_ne!(a, b);
    }

    #[test]
    fn test_restore_reopens_entry() {
        let mut registry = PendingFlipRegistry::new();
        let id = registry.commit(player(), 100, CoinSide::Tails);
        let flip = registry.take(id).unwrap();
        registry.restore(flip);
        assert!(registry.is_pending(id));
        assert_eq!(registry.take(id).unwrap(), flip);
    }
}
