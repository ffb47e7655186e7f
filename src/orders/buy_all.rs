use bytes::Bytes;
use catctx::{build_output, hash160, Hash160, SatoshiBytes};
use serde::{Deserialize, Serialize};

use crate::{
    registry::{state_commitment_output, TxoStateHashes},
    CancelAuth, RejectReason, SpendCtx, TokenAmount, TokenState,
};

/// A buy-all order: the seller liquidates a token balance to a buyer fixed
/// at order creation. All fields are set at construction and never vary
/// across fill attempts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BuyAllOrder {
    /// The token covenant script whose output this order spends and
    /// recreates.
    pub cat20_script: Bytes,
    /// Exactly this many tokens are released to the buyer on fill.
    pub to_buyer_amount: TokenAmount,
    /// The pre-committed buyer, also the order's designated canceler.
    pub buyer_address: Hash160,
}

/// Spend-time parameters of a buy-all take, in witness order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuyAllTake {
    pub state_hashes: TxoStateHashes,
    pub token_input_index: u32,
    pub token_satoshis: SatoshiBytes,
    pub change_token_amount: TokenAmount,
    pub seller_address: Hash160,
    pub cancel: bool,
    pub auth: CancelAuth,
}

impl BuyAllOrder {
    pub fn new(cat20_script: Bytes, to_buyer_amount: TokenAmount, buyer_address: Hash160) -> Self {
        Self {
            cat20_script,
            to_buyer_amount,
            buyer_address,
        }
    }

    /// The covenant entry point. Either the designated canceler reclaims the
    /// order, or the spend must reproduce exactly the output set this order
    /// implies.
    pub fn take(&self, params: &BuyAllTake, ctx: &SpendCtx) -> Result<(), RejectReason> {
        if params.cancel {
            return params.auth.check(self.buyer_address, ctx.sighash);
        }

        ctx.authenticate()?;
        ctx.expect_token_script(params.token_input_index, &self.cat20_script)?;

        // to buyer
        let buyer_state = TokenState::new(self.to_buyer_amount, self.buyer_address);
        let to_buyer_output = build_output(&self.cat20_script, params.token_satoshis);

        // change back to the seller, if any
        let mut seller_state_hash = Vec::new();
        let mut to_seller_output = Vec::new();
        if params.change_token_amount > TokenAmount(0) {
            let change_state =
                TokenState::new(params.change_token_amount, params.seller_address);
            seller_state_hash = change_state.state_hash().0.to_vec();
            to_seller_output = build_output(&self.cat20_script, params.token_satoshis);
        }

        // the commitment always reserves two digest slots; the change slot
        // holds the digest of the empty string when there is no change
        let mut cur_state_hashes = Vec::with_capacity(40);
        cur_state_hashes.extend_from_slice(&hash160(&buyer_state.state_hash().0).0);
        cur_state_hashes.extend_from_slice(&hash160(&seller_state_hash).0);
        let state_output = state_commitment_output(&cur_state_hashes, 2, &params.state_hashes);

        ctx.expect_outputs(&[&state_output, &to_buyer_output, &to_seller_output])
    }
}
