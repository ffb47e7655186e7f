#![allow(clippy::upper_case_acronyms)]

//! The authenticated transaction-context layer shared by CAT covenants.
//!
//! A covenant runs with no native view of the transaction spending it. The
//! spender hands it a claimed [SHPreimage] plus the full prevouts and
//! spent-scripts lists; this crate proves the preimage describes the real
//! transaction (via the generator-key signature derivation), checks the
//! lists against the digests the preimage commits to, and serializes the
//! outputs a covenant reconstructs. Everything here is pure and
//! deterministic; the single host-supplied fact is the [TxSighash].

mod context;
mod hashes;
mod preimage;
mod txout;

pub use context::*;
pub use hashes::*;
pub use preimage::*;
pub use txout::*;

use thiserror::Error;

/// An error raised while authenticating caller-supplied transaction context.
#[derive(Error, Debug)]
pub enum CtxError {
    #[error("claimed sighash preimage does not describe the spending transaction")]
    ForgedPreimage,
    #[error("prevouts list does not hash to the committed prevouts digest")]
    PrevoutsDigest,
    #[error("declared input index {declared} disagrees with preimage index {committed}")]
    InputIndexMismatch { declared: u32, committed: u32 },
    #[error("input index {0} is out of range for the supplied prevouts")]
    InputIndexRange(u32),
    #[error("spent-scripts list does not hash to the committed digest")]
    SpentScriptsDigest,
    #[error("malformed signature material ({0})")]
    Signature(#[from] secp256k1::Error),
    #[error("signature verification failed")]
    BadSignature,
}
