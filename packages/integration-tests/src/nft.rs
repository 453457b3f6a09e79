//! Minimal CW721 collection used on both ledgers.
//!
//! Speaks the message subset of `common::nft` plus `ApproveAll`; minting is
//! restricted to the configured minters.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};

const MINTERS: Item<Vec<Addr>> = Item::new("minters");
const OWNERS: Map<&str, Addr> = Map::new("owners");
/// (owner, operator) => approved
const OPERATORS: Map<(&Addr, &Addr), bool> = Map::new("operators");

#[cw_serde]
pub struct InstantiateMsg {
    pub minters: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    TransferNft {
        recipient: String,
        token_id: String,
    },
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
        extension: Option<Empty>,
    },
    ApproveAll {
        operator: String,
        expires: Option<Empty>,
    },
}

#[cw_serde]
pub enum QueryMsg {
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
    pub approvals: Vec<Empty>,
}

fn instantiate(deps: DepsMut, _env: Env, _info: MessageInfo, msg: InstantiateMsg) -> StdResult<Response> {
    let minters = msg
        .minters
        .iter()
        .map(|m| deps.api.addr_validate(m))
        .collect::<StdResult<Vec<_>>>()?;
    MINTERS.save(deps.storage, &minters)?;
    Ok(Response::new())
}

fn execute(deps: DepsMut, _env: Env, info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => {
            let owner = OWNERS
                .may_load(deps.storage, &token_id)?
                .ok_or_else(|| StdError::not_found(format!("token {token_id}")))?;
            let approved = OPERATORS
                .may_load(deps.storage, (&owner, &info.sender))?
                .unwrap_or(false);
            if info.sender != owner && !approved {
                return Err(StdError::generic_err("transfer not allowed"));
            }
            let recipient = deps.api.addr_validate(&recipient)?;
            OWNERS.save(deps.storage, &token_id, &recipient)?;
            Ok(Response::new()
                .add_attribute("action", "transfer_nft")
                .add_attribute("token_id", token_id))
        }
        ExecuteMsg::Mint {
            token_id, owner, ..
        } => {
            if !MINTERS.load(deps.storage)?.contains(&info.sender) {
                return Err(StdError::generic_err("only minters can mint"));
            }
            if OWNERS.has(deps.storage, &token_id) {
                return Err(StdError::generic_err(format!("token {token_id} already minted")));
            }
            let owner = deps.api.addr_validate(&owner)?;
            OWNERS.save(deps.storage, &token_id, &owner)?;
            Ok(Response::new()
                .add_attribute("action", "mint")
                .add_attribute("token_id", token_id))
        }
        ExecuteMsg::ApproveAll { operator, .. } => {
            let operator = deps.api.addr_validate(&operator)?;
            OPERATORS.save(deps.storage, (&info.sender, &operator), &true)?;
            Ok(Response::new().add_attribute("action", "approve_all"))
        }
    }
}

fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OwnerOf { token_id, .. } => {
            let owner = OWNERS
                .may_load(deps.storage, &token_id)?
                .ok_or_else(|| StdError::not_found(format!("token {token_id}")))?;
            to_json_binary(&OwnerOfResponse {
                owner: owner.into_string(),
                approvals: vec![],
            })
        }
    }
}

pub fn contract_nft() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
