//! Coinhouse - two-sided coin wagering and settlement engine.
//!
//! Accepts a bet, escrows it against a risk-bounded bankroll, issues an
//! asynchronous randomness request, and settles the bet exactly once when
//! the configured provider responds. All money math is integer fixed-point;
//! the custody ledger only moves through deposit, escrow, payout, and
//! withdrawal.
//!
//! The engine is a single owned [`WageringEngine`] value; every public
//! operation is an atomic, serialized `&mut self` call. External layers
//! (UI, admin tooling, the randomness provider) interact through the
//! operations re-exported below and consume the [`EngineEvent`] log.

pub mod access;
pub mod bankroll;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fixed_point;
pub mod outcome;
pub mod registry;

pub use access::{AccessControl, AccountId};
pub use bankroll::{BankrollLedger, BetCheck, BetRejection};
pub use config::{EngineConfig, UNITS_PER_COIN};
pub use engine::{BetLimits, GameStats, LogRequester, OutcomeRequester, Resolution, WageringEngine};
pub use errors::{EngineError, EngineResult};
pub use events::EngineEvent;
pub use outcome::{derive_result, CoinSide, RandomValue};
pub use registry::{PendingFlip, PendingFlipRegistry, RequestId};
