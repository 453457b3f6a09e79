//! Execute handlers for the validator set.
//!
//! - `ProposeChange` - quorum vote among current validators
//! - `SyncChange` - change relayed from the mainchain by the acknowledgement contract

use common::ballot::count_members;
use common::{normalize_signer, payload_hash, Ballot};
use cosmwasm_std::{Api, DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::msg::ValidatorChange;
use crate::state::{ACKNOWLEDGEMENT, PROPOSALS, VALIDATOR_CONFIG, VOTES};

/// Validate addresses and lowercase signers so equal changes hash equally.
fn normalize_change(api: &dyn Api, change: ValidatorChange) -> Result<ValidatorChange, ContractError> {
    Ok(match change {
        ValidatorChange::AddValidator { address, signer } => ValidatorChange::AddValidator {
            address: api.addr_validate(&address)?.into_string(),
            signer: normalize_signer(&signer)?,
        },
        ValidatorChange::RemoveValidator { address } => ValidatorChange::RemoveValidator {
            address: api.addr_validate(&address)?.into_string(),
        },
        quorum @ ValidatorChange::UpdateQuorum { .. } => quorum,
    })
}

fn change_kind(change: &ValidatorChange) -> &'static str {
    match change {
        ValidatorChange::AddValidator { .. } => "add_validator",
        ValidatorChange::RemoveValidator { .. } => "remove_validator",
        ValidatorChange::UpdateQuorum { .. } => "update_quorum",
    }
}

// ============================================================================
// ProposeChange
// ============================================================================

pub fn execute_propose_change(
    deps: DepsMut,
    info: MessageInfo,
    period: u64,
    change: ValidatorChange,
) -> Result<Response, ContractError> {
    if ACKNOWLEDGEMENT.may_load(deps.storage)?.is_some() {
        return Err(ContractError::RelayedGovernance);
    }

    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    if !config.is_member(&info.sender) {
        return Err(ContractError::Unauthorized);
    }
    config.check_period(period)?;

    let change = normalize_change(deps.api, change)?;
    let hash = payload_hash(&change)?;
    // Dry run: an invalid change never takes a ballot
    let next = config.apply(period, &change, &hash)?;

    let response = Response::new()
        .add_attribute("action", "propose_change")
        .add_attribute("period", period.to_string())
        .add_attribute("change", change_kind(&change))
        .add_attribute("payload_hash", common::bytes32_to_hex(&hash))
        .add_attribute("voter", info.sender.as_str());

    let voters = match VOTES.cast(deps.storage, period, &hash, &info.sender)? {
        Ballot::Repeated => return Ok(response.add_attribute("status", "duplicate_vote")),
        Ballot::Recorded { voters } => voters,
    };
    if !PROPOSALS.has(deps.storage, (period, hash.to_vec())) {
        PROPOSALS.save(deps.storage, (period, hash.to_vec()), &change)?;
    }

    let count = count_members(&voters, |voter| config.is_member(voter));
    let response = response
        .add_attribute("votes", count.to_string())
        .add_attribute(
            "required",
            config.quorum.min_signers(config.member_count()).to_string(),
        );

    if !config.quorum.is_reached(count, config.member_count()) {
        return Ok(response.add_attribute("status", "pending"));
    }

    VALIDATOR_CONFIG.save(deps.storage, &next)?;
    Ok(response
        .add_attribute("status", "applied")
        .add_attribute("validator_count", next.member_count().to_string())
        .add_attribute("quorum", next.quorum.to_string()))
}

// ============================================================================
// SyncChange
// ============================================================================

pub fn execute_sync_change(
    deps: DepsMut,
    info: MessageInfo,
    period: u64,
    change: ValidatorChange,
) -> Result<Response, ContractError> {
    let relay = ACKNOWLEDGEMENT
        .may_load(deps.storage)?
        .ok_or(ContractError::UnauthorizedRelay)?;
    if info.sender != relay {
        return Err(ContractError::UnauthorizedRelay);
    }

    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    let change = normalize_change(deps.api, change)?;
    let hash = payload_hash(&change)?;

    let response = Response::new()
        .add_attribute("action", "sync_change")
        .add_attribute("period", period.to_string())
        .add_attribute("change", change_kind(&change))
        .add_attribute("payload_hash", common::bytes32_to_hex(&hash));

    let already_applied = config.period == Some(period)
        && config.last_change.as_ref().map(|h| h.as_slice()) == Some(hash.as_slice());
    if already_applied {
        return Ok(response.add_attribute("status", "already_applied"));
    }

    config.check_period(period)?;
    let next = config.apply(period, &change, &hash)?;
    VALIDATOR_CONFIG.save(deps.storage, &next)?;

    Ok(response
        .add_attribute("status", "applied")
        .add_attribute("validator_count", next.member_count().to_string())
        .add_attribute("quorum", next.quorum.to_string()))
}
