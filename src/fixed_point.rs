//! Fixed-point arithmetic for payouts and exposure fractions.
//!
//! All monetary math in the engine is integer-only. Multipliers and fractions
//! are carried at a 1e8 scale (`SCALE`), so the 1.98x payout multiplier is
//! `198_000_000` and a 10% exposure fraction is `10_000_000`.

/// Denominator of the fixed-point scale: 1.0 == 100_000_000.
pub const SCALE: u64 = 100_000_000;

/// Payout multiplier applied to a winning stake: 1.98x.
pub const PAYOUT_MULTIPLIER: u64 = 198_000_000;

/// Basis-point denominator (10_000 bps == 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Multiplies `amount` by a `SCALE`-denominated `factor`, rounding down.
///
/// Intermediate math is done in `u128`; a result that would not fit a `u64`
/// saturates at `u64::MAX`, which is only reachable through comparison paths
/// (real payouts are bounded by the exposure cap well below that).
pub fn mul_scaled(amount: u64, factor: u64) -> u64 {
    let product = amount as u128 * factor as u128 / SCALE as u128;
    u64::try_from(product).unwrap_or(u64::MAX)
}

/// Divides `amount` by a `SCALE`-denominated `factor`, rounding down.
///
/// Returns 0 when `factor` is 0 rather than dividing by zero; callers only
/// pass validated non-zero multipliers.
pub fn div_scaled(amount: u64, factor: u64) -> u64 {
    if factor == 0 {
        return 0;
    }
    let quotient = amount as u128 * SCALE as u128 / factor as u128;
    u64::try_from(quotient).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_multiply() {
        // 0.1 coin at 1e9 units, 1.98x -> 0.198 coin.
        assert_eq!(mul_scaled(100_000_000, PAYOUT_MULTIPLIER), 198_000_000);
        // 1 coin -> 1.98 coins.
        assert_eq!(mul_scaled(1_000_000_000, PAYOUT_MULTIPLIER), 1_980_000_000);
    }

    #[test]
    fn test_multiply_rounds_down() {
        // 3 units * 1.98 = 5.94 -> 5.
        assert_eq!(mul_scaled(3, PAYOUT_MULTIPLIER), 5);
        assert_eq!(mul_scaled(1, PAYOUT_MULTIPLIER), 1);
        assert_eq!(mul_scaled(0, PAYOUT_MULTIPLIER), 0);
    }

    #[test]
    fn test_fraction_multiply() {
        // 10% of 10 coins is 1 coin.
        assert_eq!(mul_scaled(10_000_000_000, 10_000_000), 1_000_000_000);
        // 50% cap.
        assert_eq!(mul_scaled(10_000_000_000, SCALE / 2), 5_000_000_000);
    }

    #[test]
    fn test_divide_inverts_multiplier() {
        let cap = 1_000_000_000u64;
        let max_bet = div_scaled(cap, PAYOUT_MULTIPLIER);
        assert_eq!(max_bet, 505_050_505);
        // The largest stake under the cap must not overshoot it.
        assert!(mul_scaled(max_bet, PAYOUT_MULTIPLIER) <= cap);
        assert!(mul_scaled(max_bet + 1, PAYOUT_MULTIPLIER) > cap);
    }

    #[test]
    fn test_divide_by_zero_factor() {
        assert_eq!(div_scaled(1_000, 0), 0);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(mul_scaled(u64::MAX, PAYOUT_MULTIPLIER), u64::MAX);
    }
}
