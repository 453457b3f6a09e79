//! Querier helpers for contracts that resolve names and tokens through the registry.

use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

use crate::msg::{ContractResponse, MappingResponse, QueryMsg, TokenMapping};

/// Address registered under `name`; errors when missing.
pub fn contract_address(querier: &QuerierWrapper, registry: &Addr, name: &str) -> StdResult<Addr> {
    let res: ContractResponse = querier.query_wasm_smart(
        registry,
        &QueryMsg::Contract {
            name: name.to_string(),
        },
    )?;
    Ok(res.address)
}

pub fn mainchain_mapping(
    querier: &QuerierWrapper,
    registry: &Addr,
    token: &str,
) -> StdResult<Option<TokenMapping>> {
    let res: MappingResponse = querier.query_wasm_smart(
        registry,
        &QueryMsg::MainchainMapping {
            token: token.to_string(),
        },
    )?;
    Ok(res.mapping)
}

pub fn sidechain_mapping(
    querier: &QuerierWrapper,
    registry: &Addr,
    token: &str,
) -> StdResult<Option<TokenMapping>> {
    let res: MappingResponse = querier.query_wasm_smart(
        registry,
        &QueryMsg::SidechainMapping {
            token: token.to_string(),
        },
    )?;
    Ok(res.mapping)
}
