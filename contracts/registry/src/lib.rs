//! Bridge Registry
//!
//! Name → address lookups (`validator`, `acknowledgement`, `wrapped_native`)
//! and the bijective mainchain ↔ sidechain token mapping both gateways
//! resolve deposits and withdrawals against.

pub mod contract;
pub mod error;
pub mod helpers;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
