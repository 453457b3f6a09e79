use common::{BallotError, QuorumError, SignatureError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Quorum(#[from] QuorumError),

    #[error("{0}")]
    Ballot(#[from] BallotError),

    #[error("{0}")]
    Signature(#[from] SignatureError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: caller is not a validator")]
    Unauthorized,

    #[error("Unauthorized: only the acknowledgement contract can sync changes")]
    UnauthorizedRelay,

    #[error("Validator changes are relayed from the mainchain on this set")]
    RelayedGovernance,

    // ========================================================================
    // Membership Errors
    // ========================================================================
    #[error("Period {period} is not after the last applied period {last}")]
    StalePeriod { period: u64, last: u64 },

    #[error("Validator already registered: {address}")]
    DuplicateValidator { address: String },

    #[error("Signer already registered: {signer}")]
    DuplicateSigner { signer: String },

    #[error("Not a validator: {address}")]
    NotAValidator { address: String },

    #[error("Cannot remove the last validator")]
    CannotRemoveLastValidator,

    #[error("Validator set must not be empty")]
    EmptyValidatorSet,
}
