use arbitrary::Arbitrary;
use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Newtype representing a satoshi amount.
#[derive(
    Arbitrary,
    Copy,
    Clone,
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
    Into,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Display,
)]
#[serde(transparent)]
pub struct Satoshis(pub u64);

/// The fixed 8-byte little-endian value encoding carried in transaction
/// outputs. Orders store values pre-encoded, so the covenant never has to
/// re-derive the byte form at validation time.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, From, Into, Serialize, Deserialize, Arbitrary,
)]
#[serde(transparent)]
pub struct SatoshiBytes(pub [u8; 8]);

impl SatoshiBytes {
    pub const ZERO: Self = Self([0u8; 8]);
}

impl From<Satoshis> for SatoshiBytes {
    fn from(value: Satoshis) -> Self {
        Self(value.0.to_le_bytes())
    }
}

impl From<SatoshiBytes> for Satoshis {
    fn from(value: SatoshiBytes) -> Self {
        Self(u64::from_le_bytes(value.0))
    }
}

/// Appends a Bitcoin compact-size integer to `out`.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Serializes one transaction output exactly as host consensus does:
/// `value(8 LE) ‖ compact_size(script len) ‖ script`. Purely structural.
pub fn build_output(script: &[u8], value: SatoshiBytes) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + 9 + script.len());
    out.extend_from_slice(&value.0);
    write_compact_size(&mut out, script.len() as u64);
    out.extend_from_slice(script);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_layout() {
        let script = [0x51u8, 0x21, 0x00];
        let out = build_output(&script, Satoshis(330).into());
        assert_eq!(&out[..8], &330u64.to_le_bytes());
        assert_eq!(out[8], 3);
        assert_eq!(&out[9..], &script);
    }

    #[test]
    fn empty_script_output() {
        let out = build_output(&[], SatoshiBytes::ZERO);
        assert_eq!(out, [0u8; 9]);
    }

    #[test]
    fn compact_size_boundaries() {
        let cases: [(u64, Vec<u8>); 6] = [
            (0x00, vec![0x00]),
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0xffff, vec![0xfd, 0xff, 0xff]),
            (0x1_0000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (
                0x1_0000_0000,
                vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
            ),
        ];
        for (n, expect) in cases {
            let mut out = Vec::new();
            write_compact_size(&mut out, n);
            assert_eq!(out, expect, "encoding of {n:#x}");
        }
    }

    #[test]
    fn satoshi_bytes_round_trip() {
        let value = Satoshis(123_456_789);
        let bytes: SatoshiBytes = value.into();
        assert_eq!(Satoshis::from(bytes), value);
    }
}
