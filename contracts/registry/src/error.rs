use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Contract not registered: {name}")]
    ContractNotRegistered { name: String },

    #[error("Token not mapped: {token}")]
    TokenNotMapped { token: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}
