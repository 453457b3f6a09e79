//! Acknowledgement Contract - Entry Points and Handlers

use common::ballot::count_members;
use common::{bytes32_to_hex, payload_hash, Ballot};
use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Api, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo,
    Order, Response, StdResult, WasmMsg,
};
use cw2::set_contract_version;
use validator_set::helpers::snapshot;
use validator_set::msg::{ExecuteMsg as ValidatorExecuteMsg, ValidatorChange};

use crate::error::ContractError;
use crate::msg::{
    ActionTally, ConfigResponse, ExecuteMsg, GovernanceAction, InstantiateMsg, IsOperatorResponse,
    MigrateMsg, OperatorsResponse, QueryMsg, VotesResponse,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, OPERATORS, PROPOSALS, RELAYED, RELAY_VOTES,
    VOTES,
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

    let admin = deps.api.addr_validate(&msg.admin)?;
    let validator_contract = msg
        .validator_contract
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    for operator in &msg.operators {
        let operator = deps.api.addr_validate(operator)?;
        OPERATORS.save(deps.storage, &operator, &true)?;
    }

    CONFIG.save(
        deps.storage,
        &Config {
            admin: admin.clone(),
            validator_contract,
            last_period: None,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("operator_count", msg.operators.len().to_string()))
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
        ExecuteMsg::SetValidatorContract { validator_contract } => {
            execute_set_validator_contract(deps, info, validator_contract)
        }
        ExecuteMsg::UpdateValidator {
            period,
            validator_contract,
        } => execute_vote(
            deps,
            info,
            period,
            GovernanceAction::UpdateValidator { validator_contract },
        ),
        ExecuteMsg::AddOperators { period, operators } => execute_vote(
            deps,
            info,
            period,
            GovernanceAction::AddOperators { operators },
        ),
        ExecuteMsg::RemoveOperators { period, operators } => execute_vote(
            deps,
            info,
            period,
            GovernanceAction::RemoveOperators { operators },
        ),
        ExecuteMsg::RelayValidatorChange { period, change } => {
            execute_relay_validator_change(deps, info, period, change)
        }
    }
}

fn validate_operators(api: &dyn Api, operators: &[String]) -> Result<Vec<Addr>, ContractError> {
    if operators.is_empty() {
        return Err(ContractError::EmptyOperators);
    }
    operators
        .iter()
        .map(|op| api.addr_validate(op).map_err(ContractError::from))
        .collect()
}

/// Canonical form of an action so identical intents hash identically.
fn normalize_action(
    api: &dyn Api,
    action: GovernanceAction,
) -> Result<GovernanceAction, ContractError> {
    let to_strings = |addrs: Vec<Addr>| -> Vec<String> {
        addrs.into_iter().map(Addr::into_string).collect()
    };
    Ok(match action {
        GovernanceAction::UpdateValidator { validator_contract } => {
            GovernanceAction::UpdateValidator {
                validator_contract: api.addr_validate(&validator_contract)?.into_string(),
            }
        }
        GovernanceAction::AddOperators { operators } => GovernanceAction::AddOperators {
            operators: to_strings(validate_operators(api, &operators)?),
        },
        GovernanceAction::RemoveOperators { operators } => GovernanceAction::RemoveOperators {
            operators: to_strings(validate_operators(api, &operators)?),
        },
    })
}

fn execute_set_validator_contract(
    deps: DepsMut,
    info: MessageInfo,
    validator_contract: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    if config.validator_contract.is_some() {
        return Err(ContractError::ValidatorContractAlreadySet);
    }

    let validator_contract = deps.api.addr_validate(&validator_contract)?;
    config.validator_contract = Some(validator_contract.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_validator_contract")
        .add_attribute("validator_contract", validator_contract))
}

fn execute_vote(
    deps: DepsMut,
    info: MessageInfo,
    period: u64,
    action: GovernanceAction,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    let validator_contract = config
        .validator_contract
        .clone()
        .ok_or(ContractError::ValidatorContractNotSet)?;

    let set = snapshot(&deps.querier, &validator_contract)?;
    let is_member = |addr: &Addr| set.is_member(addr);
    if !is_member(&info.sender) {
        return Err(ContractError::NotValidator);
    }
    if let Some(last) = config.last_period {
        if period <= last {
            return Err(ContractError::StalePeriod { period, last });
        }
    }

    let action = normalize_action(deps.api, action)?;
    let hash = payload_hash(&action)?;

    let response = Response::new()
        .add_attribute("method", "governance_vote")
        .add_attribute("period", period.to_string())
        .add_attribute("payload_hash", bytes32_to_hex(&hash))
        .add_attribute("voter", info.sender.as_str());

    let voters = match VOTES.cast(deps.storage, period, &hash, &info.sender)? {
        Ballot::Repeated => return Ok(response.add_attribute("status", "duplicate_vote")),
        Ballot::Recorded { voters } => voters,
    };
    if !PROPOSALS.has(deps.storage, (period, hash.to_vec())) {
        PROPOSALS.save(deps.storage, (period, hash.to_vec()), &action)?;
    }

    let members = set.member_count();
    let count = count_members(&voters, is_member);
    if !set.quorum.is_reached(count, members) {
        return Ok(response
            .add_attribute("status", "pending")
            .add_attribute("votes", count.to_string()));
    }

    match &action {
        GovernanceAction::UpdateValidator { validator_contract } => {
            config.validator_contract = Some(Addr::unchecked(validator_contract));
        }
        GovernanceAction::AddOperators { operators } => {
            for operator in operators {
                OPERATORS.save(deps.storage, &Addr::unchecked(operator), &true)?;
            }
        }
        GovernanceAction::RemoveOperators { operators } => {
            for operator in operators {
                OPERATORS.remove(deps.storage, &Addr::unchecked(operator));
            }
        }
    }
    config.last_period = Some(period);
    CONFIG.save(deps.storage, &config)?;

    Ok(response
        .add_attribute("status", "applied")
        .add_attribute("votes", count.to_string()))
}

fn execute_relay_validator_change(
    deps: DepsMut,
    info: MessageInfo,
    period: u64,
    change: ValidatorChange,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let validator_contract = config
        .validator_contract
        .ok_or(ContractError::ValidatorContractNotSet)?;

    let set = snapshot(&deps.querier, &validator_contract)?;
    let is_member = |addr: &Addr| set.is_member(addr);
    if !is_member(&info.sender) {
        return Err(ContractError::NotValidator);
    }

    let hash = payload_hash(&(period, &change))?;
    let response = Response::new()
        .add_attribute("method", "relay_validator_change")
        .add_attribute("period", period.to_string())
        .add_attribute("payload_hash", bytes32_to_hex(&hash))
        .add_attribute("voter", info.sender.as_str());

    let voters = match RELAY_VOTES.cast(deps.storage, period, &hash, &info.sender)? {
        Ballot::Repeated => return Ok(response.add_attribute("status", "duplicate_vote")),
        Ballot::Recorded { voters } => voters,
    };
    if RELAYED.has(deps.storage, period) {
        return Ok(response.add_attribute("status", "already_relayed"));
    }

    let count = count_members(&voters, is_member);
    if !set.quorum.is_reached(count, set.member_count()) {
        return Ok(response
            .add_attribute("status", "pending")
            .add_attribute("votes", count.to_string()));
    }

    RELAYED.save(deps.storage, period, &hash.to_vec())?;
    let msg = WasmMsg::Execute {
        contract_addr: validator_contract.to_string(),
        msg: to_json_binary(&ValidatorExecuteMsg::SyncChange { period, change })?,
        funds: vec![],
    };

    Ok(response
        .add_message(msg)
        .add_attribute("status", "relayed")
        .add_attribute("votes", count.to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                admin: config.admin,
                validator_contract: config.validator_contract,
                last_period: config.last_period,
            })
        }
        QueryMsg::Operators {} => to_json_binary(&query_operators(deps)?),
        QueryMsg::IsOperator { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&IsOperatorResponse {
                is_operator: OPERATORS.has(deps.storage, &address),
            })
        }
        QueryMsg::Votes { period } => to_json_binary(&query_votes(deps, period)?),
    }
}

fn query_operators(deps: Deps) -> StdResult<OperatorsResponse> {
    let operators = OPERATORS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(OperatorsResponse { operators })
}

fn query_votes(deps: Deps, period: u64) -> StdResult<VotesResponse> {
    let tallies = VOTES
        .tallies(deps.storage, period)?
        .into_iter()
        .map(|(hash, voters)| {
            let action = PROPOSALS.load(deps.storage, (period, hash.clone()))?;
            Ok(ActionTally {
                payload_hash: HexBinary::from(hash),
                action,
                voters,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(VotesResponse { period, tallies })
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "migrate"))
}
