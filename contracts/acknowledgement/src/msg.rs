use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary};
use validator_set::msg::ValidatorChange;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// May be left empty and set once with `SetValidatorContract`, since the
    /// validator set is instantiated with this contract's address
    pub validator_contract: Option<String>,
    pub operators: Vec<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Action a governance vote decides on; ballots are tallied on its hash.
#[cw_serde]
pub enum GovernanceAction {
    UpdateValidator { validator_contract: String },
    AddOperators { operators: Vec<String> },
    RemoveOperators { operators: Vec<String> },
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Authorization: admin, only while no validator contract is configured
    SetValidatorContract { validator_contract: String },

    /// Authorization: sidechain validators (quorum vote)
    UpdateValidator {
        period: u64,
        validator_contract: String,
    },
    /// Authorization: sidechain validators (quorum vote)
    AddOperators { period: u64, operators: Vec<String> },
    /// Authorization: sidechain validators (quorum vote)
    RemoveOperators { period: u64, operators: Vec<String> },

    /// Confirm a mainchain-applied validator change; forwarded to the
    /// sidechain set once a quorum of its validators agrees.
    ///
    /// Authorization: sidechain validators (quorum vote)
    RelayValidatorChange {
        period: u64,
        change: ValidatorChange,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(OperatorsResponse)]
    Operators {},
    #[returns(IsOperatorResponse)]
    IsOperator { address: String },
    #[returns(VotesResponse)]
    Votes { period: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub validator_contract: Option<Addr>,
    pub last_period: Option<u64>,
}

#[cw_serde]
pub struct OperatorsResponse {
    pub operators: Vec<Addr>,
}

#[cw_serde]
pub struct IsOperatorResponse {
    pub is_operator: bool,
}

#[cw_serde]
pub struct ActionTally {
    pub payload_hash: HexBinary,
    pub action: GovernanceAction,
    pub voters: Vec<Addr>,
}

#[cw_serde]
pub struct VotesResponse {
    pub period: u64,
    pub tallies: Vec<ActionTally>,
}
