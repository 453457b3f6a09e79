//! Bridge Acknowledgement Contract
//!
//! Lives on the sidechain next to the gateway. It keeps the operator registry
//! of off-chain relayers, and forwards validator changes agreed on the
//! mainchain into the sidechain validator set once a quorum of sidechain
//! validators has confirmed them.
//!
//! Operators and the validator-set pointer are changed by quorum votes of the
//! sidechain validators, using the same ballot and stale-period rules as the
//! validator set itself.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
