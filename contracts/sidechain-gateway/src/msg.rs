//! Message types for the sidechain gateway.

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
    /// Per-owner pending withdrawal capacity (default 10)
    pub max_pending_withdrawals: Option<u32>,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

/// A mainchain deposit as observed by one validator.
///
/// Validators agree only on byte-identical payloads.
#[cw_serde]
pub struct DepositPayload {
    /// Mainchain deposit id
    pub id: u64,
    /// Sidechain beneficiary
    pub owner: String,
    /// Sidechain token to release
    pub token: String,
    pub standard: TokenStandard,
    /// Amount, or token id for non-fungible assets
    pub amount: Uint128,
}

#[cw_serde]
pub struct SignatureSubmission {
    pub id: u64,
    /// Overwrite a different signature already stored for the caller
    pub replace: bool,
    pub signature: HexBinary,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits (validator attestations)
    // ========================================================================
    /// Attest a mainchain deposit.
    ///
    /// Authorization: current validators
    ///
    /// The first payload backed by a quorum of current validators finalizes
    /// the deposit and releases the asset; later attestations are no-ops.
    DepositFor { deposit: DepositPayload },

    /// Authorization: current validators
    BatchDepositFor { deposits: Vec<DepositPayload> },

    // ========================================================================
    // Withdrawals (user intents)
    // ========================================================================
    /// Escrow a CW20 amount (requires an allowance) for release on the mainchain.
    /// `recipient` is the mainchain address and defaults to the sender.
    Withdraw {
        token: String,
        amount: Uint128,
        recipient: Option<String>,
    },

    /// Escrow wrapped native coin (registry name `wrapped_native`).
    WithdrawNative {
        amount: Uint128,
        recipient: Option<String>,
    },

    /// Escrow a CW721 token (the gateway must be an approved operator).
    WithdrawNft {
        token: String,
        token_id: Uint128,
        recipient: Option<String>,
    },

    /// Drop collected signatures so validators sign again.
    ///
    /// Authorization: withdrawal owner
    RequestSignatureAgain { id: u64 },

    // ========================================================================
    // Signatures
    // ========================================================================
    /// Store the caller's signature over the withdrawal hash.
    ///
    /// Authorization: current validators
    SubmitWithdrawalSignatures {
        id: u64,
        replace: bool,
        signature: HexBinary,
    },

    /// Authorization: current validators
    BatchSubmitWithdrawalSignatures {
        submissions: Vec<SignatureSubmission>,
    },

    // ========================================================================
    // Acknowledgements
    // ========================================================================
    /// Vote that a withdrawal was executed on the mainchain; at quorum it is
    /// marked executed and its pending slot freed.
    ///
    /// Authorization: validators
    AcknowledgeWithdrawalOnMainchain { id: u64 },

    /// Authorization: validators
    BatchAcknowledgeWithdrawalsOnMainchain { ids: Vec<u64> },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Authorization: Admin
    Pause {},
    /// Authorization: Admin
    Unpause {},
    /// Authorization: Admin
    ChangeAdmin { new_admin: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Attestation state of a mainchain deposit
    #[returns(DepositStateResponse)]
    Deposit { id: u64 },

    #[returns(WithdrawalResponse)]
    Withdrawal { id: u64 },

    #[returns(WithdrawalCountResponse)]
    WithdrawalCount {},

    /// Unacknowledged withdrawals of `owner`, in slot order
    #[returns(PendingWithdrawalsResponse)]
    PendingWithdrawals { owner: String },

    /// Signers in submission order
    #[returns(WithdrawalSignersResponse)]
    WithdrawalSigners { id: u64 },

    #[returns(WithdrawalSignatureResponse)]
    WithdrawalSignature { id: u64, signer: String },

    /// Signatures of current validators, ascending by signer: the bundle the
    /// mainchain gateway expects
    #[returns(WithdrawalSignaturesResponse)]
    WithdrawalSignatures { id: u64 },

    /// Canonical hash validators sign for a stored withdrawal
    #[returns(WithdrawalHashResponse)]
    WithdrawalHash { id: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub registry: Addr,
    pub paused: bool,
    pub max_pending_withdrawals: u32,
}

#[cw_serde]
pub struct AttestationTally {
    pub payload_hash: HexBinary,
    pub payload: DepositPayload,
    pub voters: Vec<Addr>,
}

#[cw_serde]
pub enum DepositState {
    Pending { tallies: Vec<AttestationTally> },
    Finalized { record: DepositRecord },
}

#[cw_serde]
pub struct DepositStateResponse {
    pub id: u64,
    pub state: DepositState,
}

#[cw_serde]
pub struct WithdrawalResponse {
    pub withdrawal: Option<WithdrawalRecord>,
}

#[cw_serde]
pub struct WithdrawalCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct PendingWithdrawalsResponse {
    pub ids: Vec<u64>,
    pub entries: Vec<WithdrawalRecord>,
}

#[cw_serde]
pub struct WithdrawalSignersResponse {
    pub signers: Vec<String>,
}

#[cw_serde]
pub struct WithdrawalSignatureResponse {
    pub signature: Option<HexBinary>,
}

#[cw_serde]
pub struct WithdrawalSignaturesResponse {
    pub signatures: Vec<SignatureEntry>,
}

#[cw_serde]
pub struct WithdrawalHashResponse {
    pub hash: HexBinary,
}
