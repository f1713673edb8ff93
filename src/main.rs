//! Demo session driver.
//!
//! Funds the bankroll, plays a batch of coin flips against a simulated
//! randomness provider, and prints the final stats (and optionally the full
//! event log) as JSON. The engine itself never knows the provider is local.

use clap::Parser;
use coinhouse::{AccountId, CoinSide, RandomValue, WageringEngine, UNITS_PER_COIN};
use rand::Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "coinhouse", about = "Run a simulated wagering session")]
struct Args {
    /// Number of bets to play
    #[arg(long, default_value_t = 20)]
    bets: u32,

    /// Initial bankroll in whole coins
    #[arg(long, default_value_t = 100)]
    bankroll: u64,

    /// Stake per bet in native units (1e9 per coin)
    #[arg(long, default_value_t = UNITS_PER_COIN / 10)]
    stake: u64,

    /// Print the full event log at the end
    #[arg(long)]
    dump_events: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let owner = AccountId::from_byte(1);
    let provider = AccountId::from_byte(2);
    let player = AccountId::from_byte(3);

    let mut engine = WageringEngine::new(owner, provider)?;
    engine.deposit(owner, args.bankroll * UNITS_PER_COIN)?;

    let mut rng = rand::thread_rng();
    for _ in 0..args.bets {
        let choice = if rng.gen_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        };

        let request_id = match engine.place_bet(player, choice, args.stake) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(error = %err, "bet rejected");
                continue;
            }
        };

        // Simulated provider: answers immediately with a fresh random value.
        let random_value: RandomValue = rng.gen();
        engine.resolve_bet(provider, request_id, &random_value)?;
    }

    let stats = engine.game_stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    tracing::info!(
        custody = engine.custody_balance(),
        actual = engine.actual_balance(),
        "session finished"
    );

    if args.dump_events {
        println!("{}", serde_json::to_string_pretty(&engine.drain_events())?);
    }

    Ok(())
}
