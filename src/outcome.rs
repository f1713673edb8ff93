//! Digest-based outcome derivation.
//!
//! The result side of a flip is the low bit of a SHA-256 digest over the
//! request id and the provider's random value. Tying the digest to both
//! inputs makes the outcome unpredictable before the provider responds, and
//! the low bit of a collision-resistant digest is an unbiased coin for a
//! uniformly random input.

use crate::registry::RequestId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Random value delivered by the provider: a fixed 32-byte word.
pub type RandomValue = [u8; 32];

/// The two sides of the coin. Heads is residue 0, Tails residue 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

/// Derives the result side for a request.
///
/// Digest input is `request_id` as big-endian bytes followed by the random
/// value; both fields are fixed-size, so no length framing is needed. The
/// digest's low bit (digest mod 2) picks the side.
pub fn derive_result(request_id: RequestId, random_value: &RandomValue) -> CoinSide {
    let mut hasher = Sha256::new();
    hasher.update(request_id.to_be_bytes());
    hasher.update(random_value);
    let digest = hasher.finalize();
    if digest[31] & 1 == 0 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}
