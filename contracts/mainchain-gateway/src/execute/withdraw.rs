//! Withdrawal (release) handler.

use common::{bytes32_to_hex, names, release, verify_signature_bundle, withdrawal_hash};
use common::{SignatureEntry, TokenStandard};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use registry::helpers::{contract_address, mainchain_mapping};
use validator_set::helpers::snapshot;

use crate::error::ContractError;
use crate::state::{WithdrawalRecord, CONFIG, WITHDRAWALS};

/// Verify a quorum-signed bundle and release the asset.
///
/// Fails closed: nothing is marked executed unless every check passes and the
/// release message is built.
#[allow(clippy::too_many_arguments)]
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
    recipient: Option<String>,
    token: String,
    amount: Uint128,
    signatures: Vec<SignatureEntry>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    if WITHDRAWALS
        .may_load(deps.storage, id)?
        .map_or(false, |w| w.executed)
    {
        return Err(ContractError::AlreadyProcessed { id });
    }

    let recipient = match recipient {
        Some(recipient) => deps.api.addr_validate(&recipient)?,
        None => info.sender.clone(),
    };

    let mapping = mainchain_mapping(&deps.querier, &config.registry, &token)?
        .ok_or_else(|| ContractError::UnmappedAsset {
            token: token.clone(),
        })?;
    if mapping.standard != TokenStandard::NonFungible && amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }

    let hash = withdrawal_hash(id, recipient.as_str(), &token, mapping.standard, amount);

    let validator_set = contract_address(&deps.querier, &config.registry, names::VALIDATOR)?;
    let set = snapshot(&deps.querier, &validator_set)?;
    let signers = verify_signature_bundle(deps.api, &set.signers(), &set.quorum, &hash, &signatures)?;

    let (mode, msg) = release(
        &deps.querier,
        &env.contract.address,
        &token,
        mapping.standard,
        recipient.as_str(),
        amount,
    )?;

    WITHDRAWALS.save(
        deps.storage,
        id,
        &WithdrawalRecord {
            id,
            owner: recipient.clone(),
            token: token.clone(),
            counterpart_token: mapping.sidechain_token,
            standard: mapping.standard,
            amount,
            executed: true,
            signers: signers.clone(),
        },
    )?;

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "withdraw")
        .add_attribute("withdrawal_id", id.to_string())
        .add_attribute("withdrawal_hash", bytes32_to_hex(&hash))
        .add_attribute("recipient", recipient)
        .add_attribute("token", token)
        .add_attribute("standard", mapping.standard.code().to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("release", mode.as_str())
        .add_attribute("signers", signers.len().to_string()))
}
