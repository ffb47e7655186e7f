use std::fmt::Display;

use arbitrary::Arbitrary;
use derive_more::{Add, AddAssign, From, FromStr, Into, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Newtype representing a token amount. Positive for every real token state
/// by protocol convention; this core carries the value opaquely and only
/// branches on its sign.
#[derive(
    Arbitrary,
    Clone,
    Copy,
    Default,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    From,
    FromStr,
    Into,
    Add,
    AddAssign,
    Sub,
    SubAssign,
)]
#[serde(transparent)]
pub struct TokenAmount(pub i64);

impl TokenAmount {
    /// The encoding token amounts take inside a state digest.
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
