//! Bridge Validator Set
//!
//! Holds the validators trusted to attest deposits and sign withdrawals,
//! together with the quorum fraction that gates every bridge decision.
//!
//! # Governance
//! - Mainchain: validators vote `ProposeChange { period, change }`; a change
//!   applies once the current members backing the identical change reach
//!   quorum. Each period applies at most one change and periods only grow.
//! - Sidechain: instantiated with an acknowledgement contract, the set only
//!   accepts `SyncChange` relayed from it, mirroring the mainchain history.
//!
//! # Signature checks
//! `VerifySignatures` exposes the bundle verification the mainchain gateway
//! runs before releasing a withdrawal.

pub mod contract;
pub mod error;
mod execute;
pub mod helpers;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
