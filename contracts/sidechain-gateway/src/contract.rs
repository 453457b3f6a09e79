//! Sidechain Gateway - Entry Points
//!
//! Handlers live in:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_acknowledge_withdrawal, execute_batch_acknowledge_withdrawals,
    execute_batch_deposit_for, execute_batch_submit_withdrawal_signatures, execute_change_admin,
    execute_deposit_for, execute_pause, execute_request_signature_again,
    execute_submit_withdrawal_signatures, execute_unpause, execute_withdraw,
    execute_withdraw_native, execute_withdraw_nft,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_deposit, query_pending_withdrawals, query_withdrawal,
    query_withdrawal_count, query_withdrawal_hash, query_withdrawal_signature,
    query_withdrawal_signatures, query_withdrawal_signers,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_MAX_PENDING_WITHDRAWALS,
    WITHDRAWAL_COUNT,
};

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

    let max_pending_withdrawals = msg
        .max_pending_withdrawals
        .unwrap_or(DEFAULT_MAX_PENDING_WITHDRAWALS);
    if max_pending_withdrawals == 0 {
        return Err(StdError::generic_err("max_pending_withdrawals must be positive").into());
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        registry: deps.api.addr_validate(&msg.registry)?,
        paused: false,
        max_pending_withdrawals,
    };
    CONFIG.save(deps.storage, &config)?;
    WITHDRAWAL_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("registry", config.registry)
        .add_attribute("max_pending_withdrawals", max_pending_withdrawals.to_string()))
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
        // Deposit attestations
        ExecuteMsg::DepositFor { deposit } => execute_deposit_for(deps, env, info, deposit),
        ExecuteMsg::BatchDepositFor { deposits } => {
            execute_batch_deposit_for(deps, env, info, deposits)
        }

        // Withdrawal intents
        ExecuteMsg::Withdraw {
            token,
            amount,
            recipient,
        } => execute_withdraw(deps, env, info, token, amount, recipient),
        ExecuteMsg::WithdrawNative { amount, recipient } => {
            execute_withdraw_native(deps, env, info, amount, recipient)
        }
        ExecuteMsg::WithdrawNft {
            token,
            token_id,
            recipient,
        } => execute_withdraw_nft(deps, env, info, token, token_id, recipient),
        ExecuteMsg::RequestSignatureAgain { id } => {
            execute_request_signature_again(deps, info, id)
        }

        // Signatures
        ExecuteMsg::SubmitWithdrawalSignatures {
            id,
            replace,
            signature,
        } => execute_submit_withdrawal_signatures(deps, info, id, replace, signature),
        ExecuteMsg::BatchSubmitWithdrawalSignatures { submissions } => {
            execute_batch_submit_withdrawal_signatures(deps, info, submissions)
        }

        // Acknowledgements
        ExecuteMsg::AcknowledgeWithdrawalOnMainchain { id } => {
            execute_acknowledge_withdrawal(deps, info, id)
        }
        ExecuteMsg::BatchAcknowledgeWithdrawalsOnMainchain { ids } => {
            execute_batch_acknowledge_withdrawals(deps, info, ids)
        }

        // Admin
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ChangeAdmin { new_admin } => execute_change_admin(deps, info, new_admin),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Deposit { id } => to_json_binary(&query_deposit(deps, id)?),
        QueryMsg::Withdrawal { id } => to_json_binary(&query_withdrawal(deps, id)?),
        QueryMsg::WithdrawalCount {} => to_json_binary(&query_withdrawal_count(deps)?),
        QueryMsg::PendingWithdrawals { owner } => {
            to_json_binary(&query_pending_withdrawals(deps, owner)?)
        }
        QueryMsg::WithdrawalSigners { id } => to_json_binary(&query_withdrawal_signers(deps, id)?),
        QueryMsg::WithdrawalSignature { id, signer } => {
            to_json_binary(&query_withdrawal_signature(deps, id, signer)?)
        }
        QueryMsg::WithdrawalSignatures { id } => {
            to_json_binary(&query_withdrawal_signatures(deps, id)?)
        }
        QueryMsg::WithdrawalHash { id } => to_json_binary(&query_withdrawal_hash(deps, id)?),
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
