use bytes::Bytes;
use catctx::{build_output, hash160, Hash160, SatoshiBytes};
use serde::{Deserialize, Serialize};

use crate::{
    registry::{state_commitment_output, TxoStateHashes},
    CancelAuth, RejectReason, SpendCtx, TokenAmount, TokenState,
};

/// A sell-all order: the seller escrows a token balance, releasing all of it
/// to whichever buyer pays the fixed price to the fixed payout script. All
/// fields are set at construction and never vary across fill attempts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SellAllOrder {
    /// The token covenant script whose output this order spends and
    /// recreates.
    pub cat20_script: Bytes,
    /// Destination script of the sale proceeds.
    pub recv_output: Bytes,
    /// The non-negotiable price, pre-encoded.
    pub recv_satoshis: SatoshiBytes,
    /// The order's designated canceler.
    pub seller_address: Hash160,
}

/// Spend-time parameters of a sell-all take, in witness order. Unlike the
/// buy-all side, the buyer is chosen at fill time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SellAllTake {
    pub state_hashes: TxoStateHashes,
    pub token_input_index: u32,
    pub to_buy_user_amount: TokenAmount,
    pub buy_user_address: Hash160,
    pub token_satoshis: SatoshiBytes,
    pub cancel: bool,
    pub auth: CancelAuth,
}

impl SellAllOrder {
    pub fn new(
        cat20_script: Bytes,
        recv_output: Bytes,
        recv_satoshis: SatoshiBytes,
        seller_address: Hash160,
    ) -> Self {
        Self {
            cat20_script,
            recv_output,
            recv_satoshis,
            seller_address,
        }
    }

    /// The covenant entry point. Either the seller reclaims the escrow, or
    /// the spend pays the fixed price to the fixed payout script and takes
    /// the whole balance.
    pub fn take(&self, params: &SellAllTake, ctx: &SpendCtx) -> Result<(), RejectReason> {
        if params.cancel {
            return params.auth.check(self.seller_address, ctx.sighash);
        }

        ctx.authenticate()?;
        ctx.expect_token_script(params.token_input_index, &self.cat20_script)?;

        // the whole balance goes to whoever fills; one digest slot
        let buyer_state = TokenState::new(params.to_buy_user_amount, params.buy_user_address);
        let cur_state_hashes = hash160(&buyer_state.state_hash().0).0;
        let to_buyer_output = build_output(&self.cat20_script, params.token_satoshis);

        // sale proceeds at the price fixed when the order was created
        let to_seller_output = build_output(&self.recv_output, self.recv_satoshis);

        let state_output = state_commitment_output(&cur_state_hashes, 1, &params.state_hashes);

        ctx.expect_outputs(&[&state_output, &to_buyer_output, &to_seller_output])
    }
}
