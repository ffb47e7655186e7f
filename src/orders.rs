mod buy_all;
mod sell_all;

pub use buy_all::*;
pub use sell_all::*;

use bytes::Bytes;
use catctx::{
    hash160, schnorr_verify, sha256, CtxError, Hash160, PrevoutsCtx, SHPreimage,
    SpentScriptsCtx, TxSighash,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_OTHER_OUTPUT;

/// Why a spend attempt was rejected. The chain only ever sees "invalid
/// transaction"; the distinct kinds exist for diagnostics and tests.
#[derive(Error, Debug)]
pub enum RejectReason {
    #[error("context check failed ({0})")]
    Context(#[from] CtxError),
    #[error("cancellation key does not hash to the designated canceler address")]
    CancelKeyMismatch,
    #[error("cancellation signature is invalid")]
    CancelSigInvalid,
    #[error("input {0} does not spend the order's token script")]
    TokenScriptMismatch(u32),
    #[error("reconstructed outputs do not match the committed outputs digest")]
    OutputsDigestMismatch,
}

/// The spend-time context bundle both covenants consume: the claimed
/// preimage, the revealed auxiliary lists, the host-computed sighash of the
/// real transaction, and the passthrough outputs echoed verbatim after the
/// covenant's own.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpendCtx {
    pub preimage: SHPreimage,
    pub prevouts: PrevoutsCtx,
    pub spent_scripts: SpentScriptsCtx,
    pub sighash: TxSighash,
    pub output_list: [Bytes; MAX_OTHER_OUTPUT],
}

impl SpendCtx {
    /// Authenticates the claimed preimage against the real transaction,
    /// then the auxiliary lists against the preimage. Runs before any
    /// structural check; the first failure aborts the attempt.
    pub(crate) fn authenticate(&self) -> Result<(), RejectReason> {
        self.preimage.check(self.sighash)?;
        self.prevouts.check(&self.preimage)?;
        self.spent_scripts.check(&self.preimage)?;
        Ok(())
    }

    /// Pins the input this covenant reasons about: the script spent at
    /// `index` must be the order's token script.
    pub(crate) fn expect_token_script(
        &self,
        index: u32,
        token_script: &Bytes,
    ) -> Result<(), RejectReason> {
        match self.spent_scripts.script_at(index) {
            Some(spent) if spent == token_script => Ok(()),
            _ => {
                log::warn!("input {} does not spend the order token script", index);
                Err(RejectReason::TokenScriptMismatch(index))
            }
        }
    }

    /// The binding step: digests the reconstructed outputs followed by the
    /// passthrough list and compares against the preimage's committed
    /// outputs digest.
    pub(crate) fn expect_outputs(&self, built: &[&[u8]]) -> Result<(), RejectReason> {
        let mut outputs = Vec::new();
        for bytes in built {
            outputs.extend_from_slice(bytes);
        }
        for other in &self.output_list {
            outputs.extend_from_slice(other);
        }
        let digest = sha256(&outputs);
        if digest != self.preimage.hash_outputs {
            log::warn!(
                "outputs digest mismatch: reconstructed {} committed {}",
                digest,
                self.preimage.hash_outputs
            );
            return Err(RejectReason::OutputsDigestMismatch);
        }
        Ok(())
    }
}

/// Signature material for unilateral owner cancellation: the parity prefix
/// and x-only key whose hash must equal the order's designated canceler
/// address, plus a schnorr signature over the spending transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CancelAuth {
    pub pubkey_prefix: u8,
    pub pubkey: [u8; 32],
    pub sig: [u8; 64],
}

impl CancelAuth {
    /// Hash of the compressed public key, the form addresses commit to.
    pub fn key_hash(&self) -> Hash160 {
        let mut buf = [0u8; 33];
        buf[0] = self.pubkey_prefix;
        buf[1..].copy_from_slice(&self.pubkey);
        hash160(&buf)
    }

    /// Both cancellation conditions, in order: the key must hash to the
    /// designated canceler, and the signature must verify under it. Either
    /// mismatch alone fails closed.
    pub(crate) fn check(&self, canceler: Hash160, sighash: TxSighash) -> Result<(), RejectReason> {
        if self.key_hash() != canceler {
            log::warn!("cancellation key does not hash to canceler {}", canceler);
            return Err(RejectReason::CancelKeyMismatch);
        }
        schnorr_verify(&self.pubkey, &self.sig, sighash).map_err(|err| {
            log::warn!("cancellation signature rejected ({})", err);
            RejectReason::CancelSigInvalid
        })
    }
}
