use std::{fmt::Display, str::FromStr};

use arbitrary::Arbitrary;
use derive_more::{From, Into};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// A 32-byte SHA-256 digest.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    From,
    Into,
    Serialize,
    Deserialize,
    Arbitrary,
)]
#[serde(transparent)]
pub struct Sha256Hash(pub [u8; 32]);

impl Display for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

impl FromStr for Sha256Hash {
    type Err = ParseHashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Ok(Self(bytes.try_into().map_err(|_| ParseHashError::WrongLength)?))
    }
}

/// A 20-byte RIPEMD-160∘SHA-256 digest. Doubles as the hash of a public key
/// (an address) and as the truncated digest of a token state.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    From,
    Into,
    Serialize,
    Deserialize,
    Arbitrary,
)]
#[serde(transparent)]
pub struct Hash160(pub [u8; 20]);

impl Display for Hash160 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

impl FromStr for Hash160 {
    type Err = ParseHashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Ok(Self(bytes.try_into().map_err(|_| ParseHashError::WrongLength)?))
    }
}

#[derive(Error, Debug, Clone)]
pub enum ParseHashError {
    #[error("hex error ({0})")]
    HexError(#[from] hex::FromHexError),
    #[error("wrong digest length")]
    WrongLength,
}

/// SHA-256 of an arbitrary byte string.
pub fn sha256(data: &[u8]) -> Sha256Hash {
    Sha256Hash(Sha256::digest(data).into())
}

/// RIPEMD-160 of the SHA-256 of an arbitrary byte string.
pub fn hash160(data: &[u8]) -> Hash160 {
    Hash160(Ripemd160::digest(Sha256::digest(data)).into())
}

/// BIP-340 style tagged hash: `sha256(sha256(tag) ‖ sha256(tag) ‖ parts…)`.
pub fn tagged_hash(tag: &[u8], parts: &[&[u8]]) -> Sha256Hash {
    let tag_digest = Sha256::digest(tag);
    let mut hasher = Sha256::new();
    hasher.update(tag_digest);
    hasher.update(tag_digest);
    for part in parts {
        hasher.update(part);
    }
    Sha256Hash(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty_vector() {
        assert_eq!(
            sha256(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash160_empty_vector() {
        assert_eq!(
            hash160(b"").to_string(),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
    }

    #[test]
    fn hex_round_trip() {
        let digest = sha256(b"catmarket");
        let parsed: Sha256Hash = digest.to_string().parse().unwrap();
        assert_eq!(parsed, digest);

        let short = hash160(b"catmarket");
        let parsed: Hash160 = short.to_string().parse().unwrap();
        assert_eq!(parsed, short);

        assert!("zz".parse::<Hash160>().is_err());
        assert!("aabb".parse::<Hash160>().is_err());
    }

    #[test]
    fn tagged_hash_separates_domains() {
        let one = tagged_hash(b"TagA", &[b"payload"]);
        let two = tagged_hash(b"TagB", &[b"payload"]);
        assert_ne!(one, two);
        // split points must not matter, only the concatenation
        assert_eq!(
            tagged_hash(b"TagA", &[b"pay", b"load"]),
            tagged_hash(b"TagA", &[b"payload"])
        );
    }
}
