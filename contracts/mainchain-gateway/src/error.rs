//! Error types for the mainchain gateway.

use common::asset::AssetError;
use common::SignatureError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Asset(#[from] AssetError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Bridge is paused")]
    Paused,

    // ========================================================================
    // Deposit Errors
    // ========================================================================
    #[error("Asset not mapped: {token}")]
    UnmappedAsset { token: String },

    #[error("Token {token} is mapped as {standard}, which this entry point does not accept")]
    StandardMismatch { token: String, standard: String },

    #[error("No funds sent")]
    NoFundsSent,

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
    #[error("Withdrawal {id} already processed")]
    AlreadyProcessed { id: u64 },

    #[error("Quorum not met: {got} valid signatures, {required} required")]
    QuorumNotMet { got: u64, required: u64 },

    #[error("Malformed signature bundle: {0}")]
    MalformedBundle(SignatureError),
}

impl From<SignatureError> for ContractError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::QuorumNotMet { got, required } => {
                ContractError::QuorumNotMet { got, required }
            }
            other => ContractError::MalformedBundle(other),
        }
    }
}
