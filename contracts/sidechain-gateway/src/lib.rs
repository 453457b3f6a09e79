//! Sidechain Gateway - Deposit Reconciliation and Withdrawal Signatures
//!
//! # Deposit Flow (Attest)
//! 1. Each validator observes a mainchain deposit and calls `DepositFor`
//! 2. Attestations are tallied per (deposit id, payload hash)
//! 3. The first payload backed by a quorum of current validators finalizes
//!    the deposit; the asset is transferred from escrow or minted
//!
//! # Withdrawal Flow (Sign)
//! 1. User escrows an asset with `Withdraw*`; the withdrawal takes a slot in
//!    the user's pending queue (bounded, default 10)
//! 2. Validators submit signatures over the canonical withdrawal hash
//! 3. A relayer assembles the ascending bundle and executes it on the mainchain
//! 4. A validator quorum acknowledges execution, freeing the slot
//!
//! Every attestation, signature and acknowledgement path tolerates replays.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
