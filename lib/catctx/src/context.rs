use arbitrary::Arbitrary;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    hashes::{sha256, Sha256Hash},
    txout::write_compact_size,
    CtxError, SHPreimage,
};

/// A reference to the output an input spends: transaction id plus output
/// index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct Outpoint {
    pub txid: Sha256Hash,
    pub vout: u32,
}

impl Outpoint {
    pub fn new(txid: Sha256Hash, vout: u32) -> Self {
        Self { txid, vout }
    }

    /// `txid ‖ vout LE`, the layout the prevouts digest is computed over.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..32].copy_from_slice(&self.txid.0);
        out[32..].copy_from_slice(&self.vout.to_le_bytes());
        out
    }
}

/// The full previous-output list of the spending transaction, revealed by
/// the spender so the covenant can index into it, plus the declared index of
/// the input carrying this covenant.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct PrevoutsCtx {
    pub prevouts: Vec<Outpoint>,
    pub input_index: u32,
}

impl PrevoutsCtx {
    /// Digest over the concatenated outpoints, the form committed in the
    /// preimage's `hash_prevouts`.
    pub fn digest(&self) -> Sha256Hash {
        let mut buf = Vec::with_capacity(self.prevouts.len() * 36);
        for prevout in &self.prevouts {
            buf.extend_from_slice(&prevout.to_bytes());
        }
        sha256(&buf)
    }

    /// The outpoint spent by the declared input, if the index is in range.
    pub fn spent_outpoint(&self) -> Option<&Outpoint> {
        self.prevouts.get(self.input_index as usize)
    }

    /// Checks this list against the digest and input index committed in an
    /// authenticated preimage.
    pub fn check(&self, preimage: &SHPreimage) -> Result<(), CtxError> {
        if self.digest() != preimage.hash_prevouts {
            return Err(CtxError::PrevoutsDigest);
        }
        if self.input_index != preimage.input_index {
            return Err(CtxError::InputIndexMismatch {
                declared: self.input_index,
                committed: preimage.input_index,
            });
        }
        if self.input_index as usize >= self.prevouts.len() {
            return Err(CtxError::InputIndexRange(self.input_index));
        }
        Ok(())
    }
}

/// The scripts of every output the spending transaction consumes, in input
/// order.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct SpentScriptsCtx {
    pub scripts: Vec<Bytes>,
}

impl SpentScriptsCtx {
    pub fn new(scripts: Vec<Bytes>) -> Self {
        Self { scripts }
    }

    /// Digest over the compact-size-prefixed scripts, the form committed in
    /// the preimage's `hash_spent_scripts`.
    pub fn digest(&self) -> Sha256Hash {
        let mut buf = Vec::new();
        for script in &self.scripts {
            write_compact_size(&mut buf, script.len() as u64);
            buf.extend_from_slice(script);
        }
        sha256(&buf)
    }

    pub fn script_at(&self, index: u32) -> Option<&Bytes> {
        self.scripts.get(index as usize)
    }

    /// Checks this list against the digest committed in an authenticated
    /// preimage.
    pub fn check(&self, preimage: &SHPreimage) -> Result<(), CtxError> {
        if self.digest() != preimage.hash_spent_scripts {
            return Err(CtxError::SpentScriptsDigest);
        }
        Ok(())
    }
}
