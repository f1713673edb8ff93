//! The wagering engine.
//!
//! Orchestrates bet validation, escrow, randomness-request issuance, and
//! settlement over a single owned state value. Every public operation runs
//! behind `&mut self`, so each one is an atomic, serialized unit of work: no
//! two operations interleave their effects, and a failed operation leaves no
//! partial state behind.
//!
//! Settlement ordering discipline: the pending entry is removed from the
//! registry before any funds move, so a request id can never pay out twice,
//! no matter how the provider behaves.

use crate::access::AccountId;
use crate::bankroll::{BankrollLedger, BetCheck, BetRejection};
use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::events::EngineEvent;
use crate::fixed_point::mul_scaled;
use crate::outcome::{derive_result, CoinSide, RandomValue};
use crate::registry::{PendingFlipRegistry, RequestId};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Hook through which the engine notifies the external randomness provider
/// that a request awaits a value. Fire-and-forget: the engine never blocks on
/// it, and the provider answers later through
/// [`WageringEngine::resolve_bet`], correlated only by the request id.
pub trait OutcomeRequester {
    fn request_outcome(&self, request_id: RequestId);
}

/// Default requester: the request is visible in the event log and the trace
/// stream only. Used when the provider polls for open requests itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequester;

impl OutcomeRequester for LogRequester {
    fn request_outcome(&self, request_id: RequestId) {
        debug!(request_id, "outcome request issued");
    }
}

/// Current bet limits derived from config and custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetLimits {
    pub min_bet: u64,
    pub max_bet: u64,
    pub max_payout: u64,
}

/// Cumulative game counters plus the number of open requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total_bets: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_wagered: u64,
    pub total_paid_out: u64,
    pub open_requests: u64,
}

/// Outcome of a settled bet, returned to the resolving caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub request_id: RequestId,
    pub player: AccountId,
    pub stake: u64,
    pub choice: CoinSide,
    pub result: CoinSide,
    pub did_win: bool,
    pub payout: u64,
}

/// The wagering and settlement engine.
pub struct WageringEngine {
    config: EngineConfig,
    bankroll: BankrollLedger,
    registry: PendingFlipRegistry,
    stats: GameStats,
    events: Vec<EngineEvent>,
    requester: Box<dyn OutcomeRequester>,
}

impl WageringEngine {
    /// Engine with default config for the given owner and provider.
    pub fn new(owner: AccountId, provider: AccountId) -> EngineResult<Self> {
        Ok(Self::with_config(EngineConfig::new(owner, provider)?))
    }

    /// Engine over an already-validated config.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            bankroll: BankrollLedger::new(),
            registry: PendingFlipRegistry::new(),
            stats: GameStats::default(),
            events: Vec::new(),
            requester: Box::new(LogRequester),
        }
    }

    /// Installs the provider notification hook.
    pub fn set_outcome_requester(&mut self, requester: Box<dyn OutcomeRequester>) {
        self.requester = requester;
    }

    // --- wagering ---

    /// Validates, escrows, and registers a bet, then issues the outcome
    /// request. Escrow strictly precedes the external request, so a reentrant
    /// resolution can never observe an under-funded ledger.
    pub fn place_bet(
        &mut self,
        player: AccountId,
        choice: CoinSide,
        stake: u64,
    ) -> EngineResult<RequestId> {
        let check = self.bankroll.can_place_bet(&self.config, stake);
        if let Some(reason) = check.reason {
            return Err(match reason {
                BetRejection::BelowMinimum => EngineError::BetBelowMinimum {
                    stake,
                    min_bet: self.config.min_bet,
                },
                BetRejection::ExceedsMaxReward => EngineError::BetExceedsMaxReward {
                    payout: mul_scaled(stake, self.config.payout_multiplier),
                    cap: self.bankroll.max_allowed_payout(&self.config),
                },
            });
        }

        self.bankroll.credit(stake);
        let request_id = self.registry.commit(player, stake, choice);
        self.stats.total_bets += 1;
        self.stats.total_wagered += stake;

        info!(request_id, player = %player, stake, choice = %choice, "bet committed");
        self.events.push(EngineEvent::BetCommitted {
            player,
            stake,
            choice,
            request_id,
        });
        self.events
            .push(EngineEvent::OutcomeRequested { request_id });
        self.requester.request_outcome(request_id);

        Ok(request_id)
    }

    /// Settles the bet for `request_id` with the provider's random value.
    /// Provider-only; at most one call per request id can succeed.
    pub fn resolve_bet(
        &mut self,
        caller: AccountId,
        request_id: RequestId,
        random_value: &RandomValue,
    ) -> EngineResult<Resolution> {
        self.config.access.require_provider(caller)?;

        // Removal precedes the payout transfer; a replayed id finds nothing.
        let flip = self.registry.take(request_id)?;

        let result = derive_result(request_id, random_value);
        let did_win = result == flip.choice;
        let payout = if did_win {
            let payout = mul_scaled(flip.stake, self.config.payout_multiplier);
            if let Err(err) = self.bankroll.debit(payout) {
                // Cannot fund the payout (custody drained since acceptance).
                // Reopen the entry so the whole operation has no effect.
                self.registry.restore(flip);
                warn!(request_id, payout, error = %err, "payout underfunded, resolution rolled back");
                return Err(err);
            }
            self.stats.total_wins += 1;
            self.stats.total_paid_out += payout;
            payout
        } else {
            // Stake stays in custody; the house keeps it.
            self.stats.total_losses += 1;
            0
        };

        info!(
            request_id,
            player = %flip.player,
            stake = flip.stake,
            choice = %flip.choice,
            result = %result,
            did_win,
            payout,
            random_value = %hex::encode(random_value),
            "bet revealed"
        );
        self.events.push(EngineEvent::BetRevealed {
            player: flip.player,
            stake: flip.stake,
            choice: flip.choice,
            result,
            did_win,
            payout,
            request_id,
        });

        Ok(Resolution {
            request_id,
            player: flip.player,
            stake: flip.stake,
            choice: flip.choice,
            result,
            did_win,
            payout,
        })
    }

    // --- fund operations (owner-only) ---

    pub fn deposit(&mut self, caller: AccountId, amount: u64) -> EngineResult<()> {
        self.config.access.require_owner(caller)?;
        if amount == 0 {
            return Err(EngineError::InvalidAmount("deposit must be non-zero"));
        }
        self.bankroll.credit(amount);
        info!(depositor = %caller, amount, "funds deposited");
        self.events.push(EngineEvent::FundsDeposited {
            depositor: caller,
            amount,
        });
        Ok(())
    }

    pub fn withdraw(&mut self, caller: AccountId, amount: u64) -> EngineResult<()> {
        self.config.access.require_owner(caller)?;
        self.bankroll.debit(amount)?;
        info!(recipient = %caller, amount, "funds withdrawn");
        self.events.push(EngineEvent::FundsWithdrawn {
            recipient: caller,
            amount,
        });
        Ok(())
    }

    /// Drains the entire custody balance in one call.
    pub fn emergency_withdraw(&mut self, caller: AccountId) -> EngineResult<u64> {
        self.config.access.require_owner(caller)?;
        let amount = self.bankroll.drain();
        warn!(recipient = %caller, amount, "emergency withdrawal");
        self.events.push(EngineEvent::EmergencyWithdrawal {
            recipient: caller,
            amount,
        });
        Ok(amount)
    }

    /// Value sent to the engine outside of `place_bet`/`deposit`. Accepted
    /// only from the owner and folded into custody; any other sender is
    /// rejected and nothing changes.
    pub fn receive_transfer(&mut self, sender: AccountId, amount: u64) -> EngineResult<()> {
        self.config.access.require_owner(sender)?;
        if amount == 0 {
            return Err(EngineError::InvalidAmount("transfer must be non-zero"));
        }
        self.bankroll.credit(amount);
        info!(depositor = %sender, amount, "direct transfer folded into custody");
        self.events.push(EngineEvent::FundsDeposited {
            depositor: sender,
            amount,
        });
        Ok(())
    }

    // --- administration (owner-only) ---

    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> EngineResult<()> {
        let old = self.config.access.transfer_ownership(caller, new_owner)?;
        info!(old = %old, new = %new_owner, "ownership transferred");
        self.events.push(EngineEvent::OwnershipTransferred {
            old,
            new: new_owner,
        });
        Ok(())
    }

    pub fn set_randomness_provider(
        &mut self,
        caller: AccountId,
        new_provider: AccountId,
    ) -> EngineResult<()> {
        let old = self.config.access.set_provider(caller, new_provider)?;
        info!(old = %old, new = %new_provider, "randomness provider changed");
        self.events.push(EngineEvent::ProviderChanged {
            old,
            new: new_provider,
        });
        Ok(())
    }

    pub fn set_min_bet(&mut self, caller: AccountId, value: u64) -> EngineResult<()> {
        self.config.access.require_owner(caller)?;
        EngineConfig::validate_min_bet(value)?;
        let old = std::mem::replace(&mut self.config.min_bet, value);
        info!(old, new = value, "min bet updated");
        self.events
            .push(EngineEvent::MinBetUpdated { old, new: value });
        Ok(())
    }

    pub fn set_max_exposure_fraction(&mut self, caller: AccountId, value: u64) -> EngineResult<()> {
        self.config.access.require_owner(caller)?;
        EngineConfig::validate_exposure_fraction(value)?;
        let old = std::mem::replace(&mut self.config.max_exposure_fraction, value);
        info!(old, new = value, "max exposure fraction updated");
        self.events
            .push(EngineEvent::MaxExposureUpdated { old, new: value });
        Ok(())
    }

    pub fn set_house_edge(&mut self, caller: AccountId, value: u32) -> EngineResult<()> {
        self.config.access.require_owner(caller)?;
        EngineConfig::validate_house_edge(value)?;
        let old = std::mem::replace(&mut self.config.house_edge_bps, value);
        info!(old, new = value, "house edge updated");
        self.events
            .push(EngineEvent::HouseEdgeUpdated { old, new: value });
        Ok(())
    }

    // --- read-only projections ---

    pub fn can_place_bet(&self, stake: u64) -> BetCheck {
        self.bankroll.can_place_bet(&self.config, stake)
    }

    pub fn bet_limits(&self) -> BetLimits {
        BetLimits {
            min_bet: self.config.min_bet,
            max_bet: self.bankroll.max_bet(&self.config),
            max_payout: self.bankroll.max_allowed_payout(&self.config),
        }
    }

    /// Payout a winning stake of `amount` would earn. Zero in, zero out.
    pub fn calculate_payout(&self, amount: u64) -> u64 {
        mul_scaled(amount, self.config.payout_multiplier)
    }

    pub fn game_stats(&self) -> GameStats {
        // The registry is authoritative for open requests; the stored tally
        // only carries the cumulative counters.
        GameStats {
            open_requests: self.registry.open_count() as u64,
            ..self.stats
        }
    }

    pub fn custody_balance(&self) -> u64 {
        self.bankroll.custody_balance()
    }

    /// Raw balance for reconciliation against the custody balance.
    pub fn actual_balance(&self) -> u64 {
        self.bankroll.actual_balance()
    }

    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.registry.is_pending(request_id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Emitted records since construction (or the last drain).
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Hands the accumulated records to an external consumer.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Direct ledger access for reconciliation tooling.
    pub fn bankroll_mut(&mut self) -> &mut BankrollLedger {
        &mut self.bankroll
    }
}
