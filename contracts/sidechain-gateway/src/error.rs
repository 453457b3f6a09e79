//! Error types for the sidechain gateway.

use common::asset::AssetError;
use common::{BallotError, SignatureError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Asset(#[from] AssetError),

    #[error("{0}")]
    Ballot(#[from] BallotError),

    #[error("Malformed signature: {0}")]
    Signature(#[from] SignatureError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a validator")]
    NotValidator,

    #[error("Unauthorized: only the owner of withdrawal {id} can do this")]
    NotWithdrawalOwner { id: u64 },

    #[error("Bridge is paused")]
    Paused,

    // ========================================================================
    // Asset Errors
    // ========================================================================
    #[error("Asset not mapped: {token}")]
    UnmappedAsset { token: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    #[error("Sender does not own token {token_id} of {token}")]
    NotTokenOwner { token: String, token_id: String },

    #[error("Batch must not be empty")]
    EmptyBatch,

    // ========================================================================
    // Withdrawal Errors
    // ========================================================================
    #[error("Pending withdrawal capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: u32 },

    #[error("Unknown withdrawal: {id}")]
    UnknownWithdrawal { id: u64 },

    #[error("Withdrawal {id} already processed")]
    AlreadyProcessed { id: u64 },

    #[error("Signer {signer} already submitted a different signature for withdrawal {id}")]
    SignatureAlreadySubmitted { id: u64, signer: String },
}
