//! Validator Set - Entry Points

use common::{normalize_signer, Quorum};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{execute_propose_change, execute_sync_change};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, Validator};
use crate::query::{
    query_is_validator, query_quorum, query_snapshot, query_validators, query_verify_signatures,
    query_votes,
};
use crate::state::{
    ValidatorConfig, ACKNOWLEDGEMENT, CONTRACT_NAME, CONTRACT_VERSION, VALIDATOR_CONFIG,
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

    if msg.validators.is_empty() {
        return Err(ContractError::EmptyValidatorSet);
    }
    let quorum = Quorum::new(msg.quorum.num, msg.quorum.denom)?;

    let mut validators: Vec<Validator> = Vec::with_capacity(msg.validators.len());
    for init in msg.validators {
        let address = deps.api.addr_validate(&init.address)?;
        let signer = normalize_signer(&init.signer)?;
        if validators.iter().any(|v| v.address == address) {
            return Err(ContractError::DuplicateValidator {
                address: address.into_string(),
            });
        }
        if validators.iter().any(|v| v.signer == signer) {
            return Err(ContractError::DuplicateSigner { signer });
        }
        validators.push(Validator { address, signer });
    }

    let config = ValidatorConfig {
        validators,
        quorum,
        period: None,
        last_change: None,
    };
    VALIDATOR_CONFIG.save(deps.storage, &config)?;

    let mut response = Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("validator_count", config.member_count().to_string())
        .add_attribute("quorum", quorum.to_string());

    if let Some(acknowledgement) = msg.acknowledgement {
        let acknowledgement = deps.api.addr_validate(&acknowledgement)?;
        ACKNOWLEDGEMENT.save(deps.storage, &acknowledgement)?;
        response = response.add_attribute("acknowledgement", acknowledgement);
    }

    Ok(response)
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ProposeChange { period, change } => {
            execute_propose_change(deps, info, period, change)
        }
        ExecuteMsg::SyncChange { period, change } => {
            execute_sync_change(deps, info, period, change)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsValidator { address } => to_json_binary(&query_is_validator(deps, address)?),
        QueryMsg::Quorum {} => to_json_binary(&query_quorum(deps)?),
        QueryMsg::Validators {} => to_json_binary(&query_validators(deps)?),
        QueryMsg::Snapshot {} => to_json_binary(&query_snapshot(deps)?),
        QueryMsg::Votes { period } => to_json_binary(&query_votes(deps, period)?),
        QueryMsg::VerifySignatures {
            message_hash,
            signatures,
        } => to_json_binary(&query_verify_signatures(deps, message_hash, signatures)?),
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
