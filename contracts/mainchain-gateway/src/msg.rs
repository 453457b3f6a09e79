//! Message types for the mainchain gateway.

use common::{SignatureEntry, TokenStandard};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Uint128};

use crate::state::{DepositRecord, WithdrawalRecord};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub registry: String,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

/// One entry of a bulk deposit.
#[cw_serde]
pub struct BulkDeposit {
    /// CW20 or CW721 contract
    pub token: String,
    /// Amount, or token id for CW721
    pub amount: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits (Lock)
    // ========================================================================
    /// Lock the native coin sent with this message.
    ///
    /// Exactly one coin, mapped with the native standard. `owner` is the
    /// sidechain beneficiary and defaults to the sender.
    DepositNative { owner: Option<String> },

    /// Lock a CW20 amount (requires an allowance for the gateway).
    DepositToken {
        token: String,
        amount: Uint128,
        owner: Option<String>,
    },

    /// Lock a CW721 token owned by the sender (the gateway must be an
    /// approved operator).
    DepositNft {
        token: String,
        token_id: Uint128,
        owner: Option<String>,
    },

    /// Lock several fungible / non-fungible assets for one beneficiary.
    /// All-or-nothing: a failing entry reverts every deposit of the batch.
    DepositBulk {
        owner: String,
        deposits: Vec<BulkDeposit>,
    },

    // ========================================================================
    // Withdrawals (Release)
    // ========================================================================
    /// Release an asset withdrawn on the sidechain.
    ///
    /// Authorization: anyone holding a valid bundle
    ///
    /// `recipient` defaults to the sender and must match the address the
    /// validators signed for.
    Withdraw {
        id: u64,
        recipient: Option<String>,
        token: String,
        amount: Uint128,
        signatures: Vec<SignatureEntry>,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Authorization: Admin
    Pause {},
    /// Authorization: Admin
    Unpause {},
    /// Authorization: Admin
    ChangeAdmin { new_admin: String },
    /// Authorization: Admin
    UpdateRegistry { registry: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(DepositCountResponse)]
    DepositCount {},

    #[returns(DepositResponse)]
    Deposit { id: u64 },

    /// Deposits ordered by id
    #[returns(DepositsResponse)]
    Deposits {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(WithdrawalResponse)]
    Withdrawal { id: u64 },

    /// Canonical hash validators sign for a withdrawal
    #[returns(WithdrawalHashResponse)]
    WithdrawalHash {
        id: u64,
        recipient: String,
        token: String,
        standard: TokenStandard,
        amount: Uint128,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub registry: Addr,
    pub paused: bool,
}

#[cw_serde]
pub struct DepositCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct DepositResponse {
    pub deposit: Option<DepositRecord>,
}

#[cw_serde]
pub struct DepositsResponse {
    pub deposits: Vec<DepositRecord>,
}

#[cw_serde]
pub struct WithdrawalResponse {
    pub withdrawal: Option<WithdrawalRecord>,
}

#[cw_serde]
pub struct WithdrawalHashResponse {
    pub hash: HexBinary,
}
