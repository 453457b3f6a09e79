//! Withdrawal intent handlers.

use common::nft::owner_of;
use common::{bytes32_to_hex, lock_fungible, lock_nft, names, TokenStandard};
use cosmwasm_std::{Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128};
use registry::helpers::{contract_address, sidechain_mapping};
use registry::msg::TokenMapping;

use super::{hash_of, load_unpaused};
use crate::error::ContractError;
use crate::state::{
    Config, WithdrawalRecord, PENDING, WITHDRAWALS, WITHDRAWAL_COUNT, WITHDRAWAL_SIGNATURES,
    WITHDRAWAL_SIGNERS,
};

fn mapping_with_standard(
    deps: &DepsMut,
    config: &Config,
    token: &str,
    accepted: &[TokenStandard],
) -> Result<TokenMapping, ContractError> {
    sidechain_mapping(&deps.querier, &config.registry, token)?
        .filter(|m| accepted.contains(&m.standard))
        .ok_or_else(|| ContractError::UnmappedAsset {
            token: token.to_string(),
        })
}

/// Mainchain recipient; defaults to the sender.
fn recipient_or_sender(recipient: Option<String>, sender: &Addr) -> Result<String, ContractError> {
    let recipient = recipient.unwrap_or_else(|| sender.to_string());
    if recipient.trim().is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient must not be empty".to_string(),
        });
    }
    Ok(recipient)
}

/// Escrow, assign an id, enqueue and emit the withdrawal.
#[allow(clippy::too_many_arguments)]
fn open_withdrawal(
    deps: DepsMut,
    config: &Config,
    owner: Addr,
    recipient: String,
    mapping: TokenMapping,
    amount: Uint128,
    escrow: CosmosMsg,
    action: &str,
) -> Result<Response, ContractError> {
    let id = WITHDRAWAL_COUNT.may_load(deps.storage)?.unwrap_or_default();
    WITHDRAWAL_COUNT.save(deps.storage, &(id + 1))?;

    let mut queue = PENDING.may_load(deps.storage, &owner)?.unwrap_or_default();
    let slot = queue.insert(id, config.max_pending_withdrawals)?;
    PENDING.save(deps.storage, &owner, &queue)?;

    let record = WithdrawalRecord {
        id,
        owner,
        recipient,
        token: mapping.sidechain_token,
        counterpart_token: mapping.mainchain_token,
        standard: mapping.standard,
        amount,
        executed: false,
        slot,
    };
    WITHDRAWALS.save(deps.storage, id, &record)?;

    Ok(Response::new()
        .add_message(escrow)
        .add_attribute("action", action)
        .add_attribute("withdrawal_id", id.to_string())
        .add_attribute("owner", record.owner.as_str())
        .add_attribute("recipient", record.recipient.as_str())
        .add_attribute("token", record.token.as_str())
        .add_attribute("mainchain_token", record.counterpart_token.as_str())
        .add_attribute("standard", record.standard.code().to_string())
        .add_attribute("amount", record.amount.to_string())
        .add_attribute("withdrawal_hash", bytes32_to_hex(&hash_of(&record))))
}

fn ensure_positive(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Withdraw (CW20)
// ============================================================================

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = load_unpaused(deps.storage)?;
    ensure_positive(amount)?;
    let mapping = mapping_with_standard(&deps, &config, &token, &[TokenStandard::Fungible])?;
    let recipient = recipient_or_sender(recipient, &info.sender)?;

    let escrow = lock_fungible(&token, &info.sender, &env.contract.address, amount)?;
    open_withdrawal(
        deps,
        &config,
        info.sender,
        recipient,
        mapping,
        amount,
        escrow,
        "withdraw",
    )
}

// ============================================================================
// WithdrawNative (wrapped native CW20)
// ============================================================================

pub fn execute_withdraw_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = load_unpaused(deps.storage)?;
    ensure_positive(amount)?;
    let wrapped = contract_address(&deps.querier, &config.registry, names::WRAPPED_NATIVE)?;
    let mapping = mapping_with_standard(&deps, &config, wrapped.as_str(), &[TokenStandard::Native])?;
    let recipient = recipient_or_sender(recipient, &info.sender)?;

    let escrow = lock_fungible(wrapped.as_str(), &info.sender, &env.contract.address, amount)?;
    open_withdrawal(
        deps,
        &config,
        info.sender,
        recipient,
        mapping,
        amount,
        escrow,
        "withdraw_native",
    )
}

// ============================================================================
// WithdrawNft (CW721)
// ============================================================================

pub fn execute_withdraw_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    token_id: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = load_unpaused(deps.storage)?;
    let mapping = mapping_with_standard(&deps, &config, &token, &[TokenStandard::NonFungible])?;
    let recipient = recipient_or_sender(recipient, &info.sender)?;

    let id_str = token_id.to_string();
    if owner_of(&deps.querier, &token, &id_str)?.as_deref() != Some(info.sender.as_str()) {
        return Err(ContractError::NotTokenOwner {
            token,
            token_id: id_str,
        });
    }

    let escrow = lock_nft(&token, token_id, &env.contract.address)?;
    open_withdrawal(
        deps,
        &config,
        info.sender,
        recipient,
        mapping,
        token_id,
        escrow,
        "withdraw_nft",
    )
}

// ============================================================================
// RequestSignatureAgain
// ============================================================================

/// Clear collected signatures of an unexecuted withdrawal.
pub fn execute_request_signature_again(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    load_unpaused(deps.storage)?;
    let record = WITHDRAWALS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::UnknownWithdrawal { id })?;
    if record.owner != info.sender {
        return Err(ContractError::NotWithdrawalOwner { id });
    }
    if record.executed {
        return Err(ContractError::AlreadyProcessed { id });
    }

    let signers = WITHDRAWAL_SIGNERS
        .may_load(deps.storage, id)?
        .unwrap_or_default();
    for signer in &signers {
        WITHDRAWAL_SIGNATURES.remove(deps.storage, (id, signer.as_str()));
    }
    WITHDRAWAL_SIGNERS.remove(deps.storage, id);

    Ok(Response::new()
        .add_attribute("action", "request_signature_again")
        .add_attribute("withdrawal_id", id.to_string())
        .add_attribute("cleared_signatures", signers.len().to_string())
        .add_attribute("owner", record.owner.as_str())
        .add_attribute("recipient", record.recipient.as_str())
        .add_attribute("mainchain_token", record.counterpart_token.as_str())
        .add_attribute("standard", record.standard.code().to_string())
        .add_attribute("amount", record.amount.to_string())
        .add_attribute("withdrawal_hash", bytes32_to_hex(&hash_of(&record))))
}
