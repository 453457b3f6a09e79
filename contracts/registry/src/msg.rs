use common::TokenStandard;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin who maintains names and token mappings
    pub admin: String,
}

#[cw_serde]
pub struct MigrateMsg {}

/// One mainchain ↔ sidechain token pair.
///
/// Tokens are denoms or contract addresses on their own ledger; they are not
/// validated here since only one side lives on this chain.
#[cw_serde]
pub struct TokenMapping {
    pub mainchain_token: String,
    pub sidechain_token: String,
    pub standard: TokenStandard,
}

/// All execute messages are admin only.
#[cw_serde]
pub enum ExecuteMsg {
    /// Register or replace a named contract
    UpdateContract { name: String, address: String },
    /// Forget a named contract
    RemoveContract { name: String },
    /// Map a token pair; stale reverse entries of either side are dropped
    MapToken {
        mainchain_token: String,
        sidechain_token: String,
        standard: TokenStandard,
    },
    /// Remove the mapping of a mainchain token (and its reverse entry)
    UnmapToken { mainchain_token: String },
    TransferAdmin { new_admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AdminResponse)]
    Admin {},
    /// Fails when the name is not registered
    #[returns(ContractResponse)]
    Contract { name: String },
    #[returns(MappingResponse)]
    MainchainMapping { token: String },
    #[returns(MappingResponse)]
    SidechainMapping { token: String },
    /// Mappings ordered by mainchain token
    #[returns(MappingsResponse)]
    Mappings {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct AdminResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct ContractResponse {
    pub name: String,
    pub address: Addr,
}

#[cw_serde]
pub struct MappingResponse {
    pub mapping: Option<TokenMapping>,
}

#[cw_serde]
pub struct MappingsResponse {
    pub mappings: Vec<TokenMapping>,
}
