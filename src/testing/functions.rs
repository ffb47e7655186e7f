use bytes::Bytes;
use catctx::{
    hash160, sha256, Hash160, Outpoint, PrevoutsCtx, SHPreimage, SpentScriptsCtx, TxSighash,
};
use secp256k1::{Keypair, Message, Parity, SECP256K1};

use crate::{CancelAuth, SpendCtx, MAX_OTHER_OUTPUT};

pub const EMPTY_OUTPUT_LIST: [Bytes; MAX_OTHER_OUTPUT] =
    [Bytes::new(), Bytes::new(), Bytes::new()];

/// A fixed stand-in for a CAT20 covenant script (pay-to-taproot shape).
const TOKEN_SCRIPT: [u8; 34] = [
    0x51, 0x20, 0x6f, 0x1d, 0x9c, 0x03, 0xe2, 0x44, 0x8b, 0x5a, 0x77, 0x0a, 0x12, 0xf3, 0x58,
    0x21, 0xbb, 0x90, 0x4e, 0x6c, 0x35, 0xd9, 0x07, 0x88, 0x13, 0xa4, 0xc1, 0x5e, 0x62, 0x2f,
    0xd0, 0x4b, 0x39, 0xe8,
];

pub fn token_script() -> Bytes {
    Bytes::from_static(&TOKEN_SCRIPT)
}

/// A deterministic 20-byte address derived from a tag.
pub fn addr(tag: &[u8]) -> Hash160 {
    hash160(&sha256(tag).0)
}

/// Placeholder signature material for fill-branch takes, where the slots are
/// carried but never inspected.
pub fn dummy_auth() -> CancelAuth {
    CancelAuth {
        pubkey_prefix: 0x02,
        pubkey: [0u8; 32],
        sig: [0u8; 64],
    }
}

/// Assembles the authentic [SpendCtx] of a transaction whose outputs are
/// `core_outputs` followed by `output_list`, spending the token script at
/// `token_input_index` alongside one ordinary payment input.
pub fn fill_ctx(
    token_script: &Bytes,
    token_input_index: u32,
    core_outputs: &[Vec<u8>],
    output_list: [Bytes; MAX_OTHER_OUTPUT],
) -> SpendCtx {
    let n_inputs = (token_input_index as usize + 1).max(2);
    let scripts = (0..n_inputs)
        .map(|i| {
            if i == token_input_index as usize {
                token_script.clone()
            } else {
                Bytes::from_static(b"\x51")
            }
        })
        .collect();
    fill_ctx_with_scripts(scripts, token_input_index, core_outputs, output_list)
}

/// Like [fill_ctx] but with the full spent-script list given explicitly, for
/// scenarios where the declared input must spend something else.
pub fn fill_ctx_with_scripts(
    scripts: Vec<Bytes>,
    input_index: u32,
    core_outputs: &[Vec<u8>],
    output_list: [Bytes; MAX_OTHER_OUTPUT],
) -> SpendCtx {
    let prevouts = PrevoutsCtx {
        prevouts: (0..scripts.len())
            .map(|i| Outpoint::new(sha256(&[b"funding tx", &[i as u8][..]].concat()), i as u32))
            .collect(),
        input_index,
    };
    let spent_scripts = SpentScriptsCtx::new(scripts);

    let mut outputs = Vec::new();
    for out in core_outputs {
        outputs.extend_from_slice(out);
    }
    for out in &output_list {
        outputs.extend_from_slice(out);
    }

    let preimage = SHPreimage {
        tx_version: 2,
        lock_time: 0,
        hash_prevouts: prevouts.digest(),
        hash_spent_amounts: sha256(b"spent amounts"),
        hash_spent_scripts: spent_scripts.digest(),
        hash_sequences: sha256(b"sequences"),
        hash_outputs: sha256(&outputs),
        spend_type: 2,
        input_index,
        tap_leaf_hash: sha256(b"tap leaf"),
        key_version: 0,
        code_separator: u32::MAX,
    };
    let sighash = preimage.sighash();

    SpendCtx {
        preimage,
        prevouts,
        spent_scripts,
        sighash,
        output_list,
    }
}

/// Generates a fresh schnorr keypair, signs the given sighash, and returns
/// the address the material hashes to alongside the [CancelAuth].
pub fn cancel_auth(sighash: TxSighash) -> (Hash160, CancelAuth) {
    let (sk, _) = SECP256K1.generate_keypair(&mut rand::thread_rng());
    let keypair = Keypair::from_secret_key(SECP256K1, &sk);
    let (xonly, parity) = keypair.x_only_public_key();
    let prefix = match parity {
        Parity::Even => 0x02,
        Parity::Odd => 0x03,
    };
    let msg = Message::from_digest_slice(&sighash.0).expect("sighash is 32 bytes");
    let sig = keypair.sign_schnorr(msg);
    let auth = CancelAuth {
        pubkey_prefix: prefix,
        pubkey: xonly.serialize(),
        sig: *sig.as_ref(),
    };
    (auth.key_hash(), auth)
}
