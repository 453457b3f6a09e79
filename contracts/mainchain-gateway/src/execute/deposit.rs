//! Deposit (lock) handlers.

use common::nft::owner_of;
use common::{lock_fungible, lock_nft, TokenStandard};
use cosmwasm_std::{
    Addr, Attribute, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Storage,
    Uint128,
};
use registry::helpers::mainchain_mapping;
use registry::msg::TokenMapping;

use crate::error::ContractError;
use crate::msg::BulkDeposit;
use crate::state::{DepositRecord, CONFIG, DEPOSITS, DEPOSIT_COUNT};

// ============================================================================
// Helpers
// ============================================================================

fn ensure_not_paused(storage: &dyn Storage) -> Result<Addr, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    Ok(config.registry)
}

fn resolve_mapping(
    deps: Deps,
    registry: &Addr,
    token: &str,
) -> Result<TokenMapping, ContractError> {
    mainchain_mapping(&deps.querier, registry, token)?.ok_or_else(|| {
        ContractError::UnmappedAsset {
            token: token.to_string(),
        }
    })
}

/// Sidechain beneficiary; defaults to the sender.
fn beneficiary(owner: Option<String>, sender: &Addr) -> Result<String, ContractError> {
    let owner = owner.unwrap_or_else(|| sender.to_string());
    if owner.trim().is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "owner must not be empty".to_string(),
        });
    }
    Ok(owner)
}

fn ensure_positive(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Lock message for a fungible or non-fungible entry; checks NFT ownership.
fn lock_message(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    mapping: &TokenMapping,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let token = &mapping.mainchain_token;
    match mapping.standard {
        TokenStandard::Fungible => {
            ensure_positive(amount)?;
            Ok(lock_fungible(token, sender, &env.contract.address, amount)?)
        }
        TokenStandard::NonFungible => {
            let token_id = amount.to_string();
            if owner_of(&deps.querier, token, &token_id)?.as_deref() != Some(sender.as_str()) {
                return Err(ContractError::NotTokenOwner {
                    token: token.clone(),
                    token_id,
                });
            }
            Ok(lock_nft(token, amount, &env.contract.address)?)
        }
        TokenStandard::Native => Err(ContractError::StandardMismatch {
            token: token.clone(),
            standard: mapping.standard.to_string(),
        }),
    }
}

/// Assign the next id and store the record.
fn record_deposit(
    storage: &mut dyn Storage,
    owner: String,
    mapping: TokenMapping,
    amount: Uint128,
) -> Result<DepositRecord, ContractError> {
    let id = DEPOSIT_COUNT.may_load(storage)?.unwrap_or_default();
    DEPOSIT_COUNT.save(storage, &(id + 1))?;

    let record = DepositRecord {
        id,
        owner,
        token: mapping.mainchain_token,
        counterpart_token: mapping.sidechain_token,
        standard: mapping.standard,
        amount,
    };
    DEPOSITS.save(storage, id, &record)?;
    Ok(record)
}

fn deposit_attributes(record: &DepositRecord) -> Vec<Attribute> {
    vec![
        Attribute::new("deposit_id", record.id.to_string()),
        Attribute::new("owner", &record.owner),
        Attribute::new("token", &record.token),
        Attribute::new("sidechain_token", &record.counterpart_token),
        Attribute::new("standard", record.standard.code().to_string()),
        Attribute::new("amount", record.amount.to_string()),
    ]
}

// ============================================================================
// Single Deposits
// ============================================================================

pub fn execute_deposit_native(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    let registry = ensure_not_paused(deps.storage)?;

    let coin = match info.funds.as_slice() {
        [] => return Err(ContractError::NoFundsSent),
        [coin] => coin,
        _ => {
            return Err(ContractError::InvalidAmount {
                reason: "Only one coin allowed per deposit".to_string(),
            })
        }
    };
    ensure_positive(coin.amount)?;

    let mapping = resolve_mapping(deps.as_ref(), &registry, &coin.denom)?;
    if mapping.standard != TokenStandard::Native {
        return Err(ContractError::StandardMismatch {
            token: coin.denom.clone(),
            standard: mapping.standard.to_string(),
        });
    }

    let owner = beneficiary(owner, &info.sender)?;
    let record = record_deposit(deps.storage, owner, mapping, coin.amount)?;

    Ok(Response::new()
        .add_attribute("action", "deposit_native")
        .add_attribute("sender", info.sender)
        .add_attributes(deposit_attributes(&record)))
}

pub fn execute_deposit_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    let registry = ensure_not_paused(deps.storage)?;
    let mapping = resolve_mapping(deps.as_ref(), &registry, &token)?;
    if mapping.standard != TokenStandard::Fungible {
        return Err(ContractError::StandardMismatch {
            token,
            standard: mapping.standard.to_string(),
        });
    }

    let lock = lock_message(deps.as_ref(), &env, &info.sender, &mapping, amount)?;
    let owner = beneficiary(owner, &info.sender)?;
    let record = record_deposit(deps.storage, owner, mapping, amount)?;

    Ok(Response::new()
        .add_message(lock)
        .add_attribute("action", "deposit_token")
        .add_attribute("sender", info.sender)
        .add_attributes(deposit_attributes(&record)))
}

pub fn execute_deposit_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    token_id: Uint128,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    let registry = ensure_not_paused(deps.storage)?;
    let mapping = resolve_mapping(deps.as_ref(), &registry, &token)?;
    if mapping.standard != TokenStandard::NonFungible {
        return Err(ContractError::StandardMismatch {
            token,
            standard: mapping.standard.to_string(),
        });
    }

    let lock = lock_message(deps.as_ref(), &env, &info.sender, &mapping, token_id)?;
    let owner = beneficiary(owner, &info.sender)?;
    let record = record_deposit(deps.storage, owner, mapping, token_id)?;

    Ok(Response::new()
        .add_message(lock)
        .add_attribute("action", "deposit_nft")
        .add_attribute("sender", info.sender)
        .add_attributes(deposit_attributes(&record)))
}

// ============================================================================
// Bulk Deposit
// ============================================================================

pub fn execute_deposit_bulk(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    deposits: Vec<BulkDeposit>,
) -> Result<Response, ContractError> {
    let registry = ensure_not_paused(deps.storage)?;
    if deposits.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let owner = beneficiary(Some(owner), &info.sender)?;

    let mut response = Response::new()
        .add_attribute("action", "deposit_bulk")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("count", deposits.len().to_string());

    for entry in deposits {
        let mapping = resolve_mapping(deps.as_ref(), &registry, &entry.token)?;
        let lock = lock_message(deps.as_ref(), &env, &info.sender, &mapping, entry.amount)?;
        let record = record_deposit(deps.storage, owner.clone(), mapping, entry.amount)?;

        response = response.add_message(lock).add_event(
            Event::new("deposit").add_attributes(deposit_attributes(&record)),
        );
    }

    Ok(response)
}
