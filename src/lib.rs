#![doc = include_str!("../README.md")]

mod constants;
mod orders;
mod proto;
mod registry;
#[cfg(test)]
mod testing;
mod units;

pub use crate::constants::*;
pub use crate::orders::*;
pub use crate::proto::*;
pub use crate::registry::*;
pub use crate::units::*;

pub use catctx::{
    build_output, hash160, schnorr_verify, sha256, CtxError, Hash160, Outpoint, PrevoutsCtx,
    SHPreimage, SatoshiBytes, Satoshis, Sha256Hash, SpentScriptsCtx, TxSighash,
};

#[cfg(test)]
#[macro_use]
extern crate lazy_static;
