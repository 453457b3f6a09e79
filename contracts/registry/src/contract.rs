use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    AdminResponse, ContractResponse, ExecuteMsg, InstantiateMsg, MappingResponse,
    MappingsResponse, MigrateMsg, QueryMsg, TokenMapping,
};
use crate::state::{
    ADMIN, CONTRACTS, CONTRACT_NAME, CONTRACT_VERSION, MAINCHAIN_MAP, SIDECHAIN_MAP,
};
use common::TokenStandard;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    ADMIN.save(deps.storage, &admin)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::Unauthorized);
    }

    match msg {
        ExecuteMsg::UpdateContract { name, address } => {
            execute_update_contract(deps, name, address)
        }
        ExecuteMsg::RemoveContract { name } => execute_remove_contract(deps, name),
        ExecuteMsg::MapToken {
            mainchain_token,
            sidechain_token,
            standard,
        } => execute_map_token(deps, mainchain_token, sidechain_token, standard),
        ExecuteMsg::UnmapToken { mainchain_token } => execute_unmap_token(deps, mainchain_token),
        ExecuteMsg::TransferAdmin { new_admin } => execute_transfer_admin(deps, new_admin),
    }
}

fn execute_update_contract(
    deps: DepsMut,
    name: String,
    address: String,
) -> Result<Response, ContractError> {
    if name.is_empty() {
        return Err(ContractError::InvalidInput {
            reason: "contract name must not be empty".to_string(),
        });
    }
    let address = deps.api.addr_validate(&address)?;
    CONTRACTS.save(deps.storage, &name, &address)?;

    Ok(Response::new()
        .add_attribute("action", "update_contract")
        .add_attribute("name", name)
        .add_attribute("address", address))
}

fn execute_remove_contract(deps: DepsMut, name: String) -> Result<Response, ContractError> {
    if !CONTRACTS.has(deps.storage, &name) {
        return Err(ContractError::ContractNotRegistered { name });
    }
    CONTRACTS.remove(deps.storage, &name);

    Ok(Response::new()
        .add_attribute("action", "remove_contract")
        .add_attribute("name", name))
}

fn execute_map_token(
    deps: DepsMut,
    mainchain_token: String,
    sidechain_token: String,
    standard: TokenStandard,
) -> Result<Response, ContractError> {
    if mainchain_token.is_empty() || sidechain_token.is_empty() {
        return Err(ContractError::InvalidInput {
            reason: "token identifiers must not be empty".to_string(),
        });
    }

    // Keep the two directions a bijection
    if let Some(old) = MAINCHAIN_MAP.may_load(deps.storage, &mainchain_token)? {
        SIDECHAIN_MAP.remove(deps.storage, &old.sidechain_token);
    }
    if let Some(old) = SIDECHAIN_MAP.may_load(deps.storage, &sidechain_token)? {
        MAINCHAIN_MAP.remove(deps.storage, &old.mainchain_token);
    }

    let mapping = TokenMapping {
        mainchain_token,
        sidechain_token,
        standard,
    };
    MAINCHAIN_MAP.save(deps.storage, &mapping.mainchain_token, &mapping)?;
    SIDECHAIN_MAP.save(deps.storage, &mapping.sidechain_token, &mapping)?;

    Ok(Response::new()
        .add_attribute("action", "map_token")
        .add_attribute("mainchain_token", mapping.mainchain_token)
        .add_attribute("sidechain_token", mapping.sidechain_token)
        .add_attribute("standard", standard.code().to_string()))
}

fn execute_unmap_token(deps: DepsMut, mainchain_token: String) -> Result<Response, ContractError> {
    let mapping = MAINCHAIN_MAP
        .may_load(deps.storage, &mainchain_token)?
        .ok_or_else(|| ContractError::TokenNotMapped {
            token: mainchain_token.clone(),
        })?;
    MAINCHAIN_MAP.remove(deps.storage, &mapping.mainchain_token);
    SIDECHAIN_MAP.remove(deps.storage, &mapping.sidechain_token);

    Ok(Response::new()
        .add_attribute("action", "unmap_token")
        .add_attribute("mainchain_token", mapping.mainchain_token)
        .add_attribute("sidechain_token", mapping.sidechain_token))
}

fn execute_transfer_admin(deps: DepsMut, new_admin: String) -> Result<Response, ContractError> {
    let new_admin = deps.api.addr_validate(&new_admin)?;
    ADMIN.save(deps.storage, &new_admin)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_admin")
        .add_attribute("new_admin", new_admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Admin {} => to_json_binary(&AdminResponse {
            admin: ADMIN.load(deps.storage)?,
        }),
        QueryMsg::Contract { name } => to_json_binary(&query_contract(deps, name)?),
        QueryMsg::MainchainMapping { token } => to_json_binary(&MappingResponse {
            mapping: MAINCHAIN_MAP.may_load(deps.storage, &token)?,
        }),
        QueryMsg::SidechainMapping { token } => to_json_binary(&MappingResponse {
            mapping: SIDECHAIN_MAP.may_load(deps.storage, &token)?,
        }),
        QueryMsg::Mappings { start_after, limit } => {
            to_json_binary(&query_mappings(deps, start_after, limit)?)
        }
    }
}

fn query_contract(deps: Deps, name: String) -> StdResult<ContractResponse> {
    let address = CONTRACTS
        .may_load(deps.storage, &name)?
        .ok_or_else(|| StdError::not_found(format!("registry contract '{name}'")))?;
    Ok(ContractResponse { name, address })
}

fn query_mappings(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<MappingsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let mappings = MAINCHAIN_MAP
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, mapping)| mapping))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MappingsResponse { mappings })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
