use arbitrary::Arbitrary;
use catctx::{build_output, hash160, Hash160, SatoshiBytes};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_STATE_OUTPUT, OP_RETURN, STATE_OUTPUT_MARKER};

/// The per-output state digest slots the surrounding infrastructure threads
/// through every spend. This core only writes the slots into the commitment
/// root; their format is owned elsewhere and treated as opaque.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary,
)]
pub struct TxoStateHashes(pub [Hash160; MAX_STATE_OUTPUT]);

/// Builds the transaction output committing to `count` state digests
/// (`combined` is their concatenation), threading the registry slots forward
/// unchanged. By convention this output sits first in the output list. The
/// output is an unspendable zero-value OP_RETURN whose script body is the
/// protocol marker followed by the commitment root.
pub fn state_commitment_output(
    combined: &[u8],
    count: u8,
    registry: &TxoStateHashes,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(1 + combined.len() + MAX_STATE_OUTPUT * 20);
    body.push(count);
    body.extend_from_slice(combined);
    for slot in &registry.0 {
        body.extend_from_slice(&slot.0);
    }
    let root = hash160(&body);

    let mut script = Vec::with_capacity(2 + STATE_OUTPUT_MARKER.len() + 20);
    script.push(OP_RETURN);
    script.push((STATE_OUTPUT_MARKER.len() + 20) as u8);
    script.extend_from_slice(STATE_OUTPUT_MARKER);
    script.extend_from_slice(&root.0);

    build_output(&script, SatoshiBytes::ZERO)
}
