use arbitrary::Arbitrary;
use catctx::{hash160, Hash160};
use serde::{Deserialize, Serialize};

use crate::TokenAmount;

/// The logical content of one token-holding output: an amount and the hash
/// of its owner. Ephemeral — recomputed at every validation, never stored by
/// this core.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct TokenState {
    pub amount: TokenAmount,
    pub owner: Hash160,
}

impl TokenState {
    pub fn new(amount: TokenAmount, owner: Hash160) -> Self {
        Self { amount, owner }
    }

    /// Canonical digest of this state: `hash160(owner ‖ amount LE)`. Equal
    /// states always digest equally; a future spender re-derives the same
    /// value to prove continuity.
    pub fn state_hash(&self) -> Hash160 {
        let mut buf = [0u8; 28];
        buf[..20].copy_from_slice(&self.owner.0);
        buf[20..].copy_from_slice(&self.amount.to_le_bytes());
        hash160(&buf)
    }
}
