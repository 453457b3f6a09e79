//! Deposit attestation handlers.
//!
//! Each validator attests what it saw on the mainchain. Attestations are
//! tallied per (deposit id, payload hash); the first payload backed by a
//! quorum of current validators finalizes the deposit and releases the asset.

use common::ballot::count_members;
use common::{bytes32_to_hex, payload_hash, release, Ballot};
use cosmwasm_std::{CosmosMsg, DepsMut, Env, Event, MessageInfo, Response};
use registry::helpers::sidechain_mapping;
use validator_set::msg::SnapshotResponse;

use super::{current_validators, custody_standard, load_unpaused};
use crate::error::ContractError;
use crate::msg::DepositPayload;
use crate::state::{Config, DepositRecord, DEPOSITS, DEPOSIT_PAYLOADS, DEPOSIT_VOTES};

pub fn execute_deposit_for(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deposit: DepositPayload,
) -> Result<Response, ContractError> {
    execute_batch_deposit_for(deps, env, info, vec![deposit])
}

pub fn execute_batch_deposit_for(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deposits: Vec<DepositPayload>,
) -> Result<Response, ContractError> {
    let config = load_unpaused(deps.storage)?;
    if deposits.is_empty() {
        return Err(ContractError::EmptyBatch);
    }

    let set = current_validators(deps.as_ref(), &config)?;
    if !set.is_member(&info.sender) {
        return Err(ContractError::NotValidator);
    }

    let mut response = Response::new()
        .add_attribute("action", "deposit_for")
        .add_attribute("validator", info.sender.as_str())
        .add_attribute("count", deposits.len().to_string());

    for deposit in deposits {
        let (event, release_msg) = attest(deps.branch(), &env, &info, &config, &set, deposit)?;
        response = response.add_event(event);
        if let Some(msg) = release_msg {
            response = response.add_message(msg);
        }
    }

    Ok(response)
}

/// Record one attestation; returns its event and the release message when
/// this attestation finalized the deposit.
fn attest(
    deps: DepsMut,
    env: &Env,
    info: &MessageInfo,
    config: &Config,
    set: &SnapshotResponse,
    deposit: DepositPayload,
) -> Result<(Event, Option<CosmosMsg>), ContractError> {
    let id = deposit.id;
    let event = Event::new("deposit_attestation").add_attribute("deposit_id", id.to_string());

    if DEPOSITS.has(deps.storage, id) {
        return Ok((event.add_attribute("status", "already_finalized"), None));
    }

    let owner = deps.api.addr_validate(&deposit.owner)?;
    let mapping = sidechain_mapping(&deps.querier, &config.registry, &deposit.token)?
        .filter(|m| m.standard == deposit.standard)
        .ok_or_else(|| ContractError::UnmappedAsset {
            token: deposit.token.clone(),
        })?;

    let payload = DepositPayload {
        owner: owner.to_string(),
        ..deposit
    };
    let hash = payload_hash(&payload)?;
    let event = event.add_attribute("payload_hash", bytes32_to_hex(&hash));

    let voters = match DEPOSIT_VOTES.cast(deps.storage, id, &hash, &info.sender)? {
        Ballot::Repeated => return Ok((event.add_attribute("status", "duplicate_attestation"), None)),
        Ballot::Recorded { voters } => voters,
    };
    if !DEPOSIT_PAYLOADS.has(deps.storage, (id, hash.to_vec())) {
        DEPOSIT_PAYLOADS.save(deps.storage, (id, hash.to_vec()), &payload)?;
    }

    let count = count_members(&voters, |voter| set.is_member(voter));
    let event = event.add_attribute("attestations", count.to_string());
    if !set.quorum.is_reached(count, set.member_count()) {
        return Ok((event.add_attribute("status", "pending"), None));
    }

    let record = DepositRecord {
        id,
        owner,
        token: payload.token,
        counterpart_token: mapping.mainchain_token,
        standard: payload.standard,
        amount: payload.amount,
    };
    DEPOSITS.save(deps.storage, id, &record)?;

    let (mode, msg) = release(
        &deps.querier,
        &env.contract.address,
        &record.token,
        custody_standard(record.standard),
        record.owner.as_str(),
        record.amount,
    )?;

    Ok((
        event
            .add_attribute("status", "finalized")
            .add_attribute("owner", record.owner)
            .add_attribute("token", record.token)
            .add_attribute("standard", record.standard.code().to_string())
            .add_attribute("amount", record.amount.to_string())
            .add_attribute("release", mode.as_str()),
        Some(msg),
    ))
}
