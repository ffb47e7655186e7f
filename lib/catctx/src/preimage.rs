use arbitrary::Arbitrary;
use derive_more::{From, Into};
use once_cell::sync::Lazy;
use secp256k1::{schnorr, Message, Scalar, SecretKey, XOnlyPublicKey};
use serde::{Deserialize, Serialize};

use crate::{
    hashes::{tagged_hash, Sha256Hash},
    CtxError,
};

/// x coordinate of the secp256k1 generator point, the fixed verification key
/// of the preimage check.
pub const GENERATOR_X: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b,
    0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8,
    0x17, 0x98,
];

static GENERATOR_KEY: Lazy<XOnlyPublicKey> =
    Lazy::new(|| XOnlyPublicKey::from_slice(&GENERATOR_X).expect("generator x coordinate"));

const TAG_TAP_SIGHASH: &[u8] = b"TapSighash";
const TAG_CHALLENGE: &[u8] = b"BIP0340/challenge";
const SIGHASH_EPOCH: u8 = 0x00;
const HASH_TYPE_DEFAULT: u8 = 0x00;

/// The signature hash of the transaction actually being validated, computed
/// natively by the host's evaluation engine. This is the one fact the
/// covenant receives about the real transaction; everything else it learns
/// by checking caller-supplied context against it.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, From, Into, Serialize, Deserialize, Arbitrary,
)]
#[serde(transparent)]
pub struct TxSighash(pub [u8; 32]);

/// Caller-supplied serialization of the digest-relevant fields of the
/// spending transaction. Authenticity is proven by [SHPreimage::check], not
/// assumed.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct SHPreimage {
    pub tx_version: u32,
    pub lock_time: u32,
    pub hash_prevouts: Sha256Hash,
    pub hash_spent_amounts: Sha256Hash,
    pub hash_spent_scripts: Sha256Hash,
    pub hash_sequences: Sha256Hash,
    pub hash_outputs: Sha256Hash,
    pub spend_type: u8,
    pub input_index: u32,
    pub tap_leaf_hash: Sha256Hash,
    pub key_version: u8,
    pub code_separator: u32,
}

impl SHPreimage {
    /// The exact byte layout the host's signature-hashing algorithm digests.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(211);
        out.push(HASH_TYPE_DEFAULT);
        out.extend_from_slice(&self.tx_version.to_le_bytes());
        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out.extend_from_slice(&self.hash_prevouts.0);
        out.extend_from_slice(&self.hash_spent_amounts.0);
        out.extend_from_slice(&self.hash_spent_scripts.0);
        out.extend_from_slice(&self.hash_sequences.0);
        out.extend_from_slice(&self.hash_outputs.0);
        out.push(self.spend_type);
        out.extend_from_slice(&self.input_index.to_le_bytes());
        out.extend_from_slice(&self.tap_leaf_hash.0);
        out.push(self.key_version);
        out.extend_from_slice(&self.code_separator.to_le_bytes());
        out
    }

    /// The signature hash these preimage bytes map to.
    pub fn sighash(&self) -> TxSighash {
        TxSighash(tagged_hash(TAG_TAP_SIGHASH, &[&[SIGHASH_EPOCH], &self.to_vec()]).0)
    }

    /// Proves that this preimage describes the transaction the host is
    /// validating. The schnorr signature `(Gx, 1 + e)` is derived from the
    /// claimed preimage alone, then verified against the generator key over
    /// the host-computed sighash `real`; the two agree iff the claimed bytes
    /// are exactly the ones the chain hashed.
    pub fn check(&self, real: TxSighash) -> Result<(), CtxError> {
        let claimed = self.sighash();
        let e = tagged_hash(TAG_CHALLENGE, &[&GENERATOR_X, &GENERATOR_X, &claimed.0]);
        // s = 1 + e. A challenge of zero or at least the group order cannot
        // correspond to any real spend, so the conversion failing is itself
        // a forgery signal.
        let s = SecretKey::from_slice(&e.0)
            .and_then(|sk| sk.add_tweak(&Scalar::ONE))
            .map_err(|_| CtxError::ForgedPreimage)?;
        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&GENERATOR_X);
        sig_bytes[32..].copy_from_slice(&s.secret_bytes());
        let sig = schnorr::Signature::from_slice(&sig_bytes)?;
        let msg = Message::from_digest_slice(&real.0)?;
        sig.verify(&msg, &GENERATOR_KEY)
            .map_err(|_| CtxError::ForgedPreimage)
    }
}

/// Verifies a schnorr signature under an x-only public key over the host
/// sighash. The covenants use this for owner cancellation.
pub fn schnorr_verify(pubkey: &[u8; 32], sig: &[u8; 64], msg: TxSighash) -> Result<(), CtxError> {
    let pubkey = XOnlyPublicKey::from_slice(pubkey)?;
    let sig = schnorr::Signature::from_slice(sig)?;
    let msg = Message::from_digest_slice(&msg.0)?;
    sig.verify(&msg, &pubkey).map_err(|_| CtxError::BadSignature)
}
