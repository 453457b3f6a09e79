//! Mainchain Gateway - Entry Points
//!
//! Handlers live in:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_change_admin, execute_deposit_bulk, execute_deposit_native, execute_deposit_nft,
    execute_deposit_token, execute_pause, execute_unpause, execute_update_registry,
    execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_deposit, query_deposit_count, query_deposits, query_withdrawal,
    query_withdrawal_hash,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEPOSIT_COUNT};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        registry: deps.api.addr_validate(&msg.registry)?,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;
    DEPOSIT_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("registry", config.registry))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deposits
        ExecuteMsg::DepositNative { owner } => execute_deposit_native(deps, info, owner),
        ExecuteMsg::DepositToken {
            token,
            amount,
            owner,
        } => execute_deposit_token(deps, env, info, token, amount, owner),
        ExecuteMsg::DepositNft {
            token,
            token_id,
            owner,
        } => execute_deposit_nft(deps, env, info, token, token_id, owner),
        ExecuteMsg::DepositBulk { owner, deposits } => {
            execute_deposit_bulk(deps, env, info, owner, deposits)
        }

        // Withdrawals
        ExecuteMsg::Withdraw {
            id,
            recipient,
            token,
            amount,
            signatures,
        } => execute_withdraw(deps, env, info, id, recipient, token, amount, signatures),

        // Admin
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ChangeAdmin { new_admin } => execute_change_admin(deps, info, new_admin),
        ExecuteMsg::UpdateRegistry { registry } => execute_update_registry(deps, info, registry),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::DepositCount {} => to_json_binary(&query_deposit_count(deps)?),
        QueryMsg::Deposit { id } => to_json_binary(&query_deposit(deps, id)?),
        QueryMsg::Deposits { start_after, limit } => {
            to_json_binary(&query_deposits(deps, start_after, limit)?)
        }
        QueryMsg::Withdrawal { id } => to_json_binary(&query_withdrawal(deps, id)?),
        QueryMsg::WithdrawalHash {
            id,
            recipient,
            token,
            standard,
            amount,
        } => to_json_binary(&query_withdrawal_hash(
            id, recipient, token, standard, amount,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "migrate"))
}
