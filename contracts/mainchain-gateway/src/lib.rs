//! Mainchain Gateway - Asset Custody on the Mainchain
//!
//! # Deposit Flow (Lock)
//! 1. User locks native coin, a CW20 amount or a CW721 token with the gateway
//! 2. The gateway assigns the next deposit id and emits the record
//! 3. Sidechain validators attest the deposit on the sidechain gateway
//!
//! # Withdrawal Flow (Release)
//! 1. A relayer submits the quorum-signed bundle collected on the sidechain
//! 2. The gateway recomputes the canonical withdrawal hash and verifies the
//!    bundle against the current validator set
//! 3. The asset is released (transfer from custody, or mint) exactly once
//!
//! # Security
//! - Withdrawal ids are single-use
//! - Bundles must be strictly ascending by signer and meet quorum
//! - Emergency pause for every mutating user entry point

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
