use common::BallotError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ballot(#[from] BallotError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a validator")]
    NotValidator,

    #[error("Validator contract already configured")]
    ValidatorContractAlreadySet,

    #[error("Validator contract not configured")]
    ValidatorContractNotSet,

    #[error("Period {period} is not after the last applied period {last}")]
    StalePeriod { period: u64, last: u64 },

    #[error("Operator list must not be empty")]
    EmptyOperators,
}
