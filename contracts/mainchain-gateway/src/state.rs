//! State definitions for the mainchain gateway.

use common::TokenStandard;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:bridge-mainchain-gateway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Registry resolving `validator` and the token mapping
    pub registry: Addr,
    pub paused: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

// ============================================================================
// Deposits
// ============================================================================

/// A locked asset awaiting attestation on the sidechain. Immutable once stored.
#[cw_serde]
pub struct DepositRecord {
    pub id: u64,
    /// Beneficiary on the sidechain
    pub owner: String,
    /// Mainchain token (denom or contract)
    pub token: String,
    /// Sidechain counterpart from the registry mapping
    pub counterpart_token: String,
    pub standard: TokenStandard,
    /// Amount, or token id for non-fungible assets
    pub amount: Uint128,
}

/// Number of deposits so far; the next deposit id
pub const DEPOSIT_COUNT: Item<u64> = Item::new("deposit_count");

pub const DEPOSITS: Map<u64, DepositRecord> = Map::new("deposits");

// ============================================================================
// Withdrawals
// ============================================================================

#[cw_serde]
pub struct WithdrawalRecord {
    pub id: u64,
    /// Recipient on the mainchain
    pub owner: Addr,
    /// Mainchain token released
    pub token: String,
    pub counterpart_token: String,
    pub standard: TokenStandard,
    pub amount: Uint128,
    pub executed: bool,
    /// Signers of the accepted bundle, ascending
    pub signers: Vec<String>,
}

/// Withdrawal id => record, written once when the withdrawal executes
pub const WITHDRAWALS: Map<u64, WithdrawalRecord> = Map::new("withdrawals");
