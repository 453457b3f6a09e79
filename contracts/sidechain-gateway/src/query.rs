//! Query handlers for the sidechain gateway.

use common::SignatureEntry;
use cosmwasm_std::{Deps, HexBinary, StdError, StdResult};

use crate::execute::{current_validators, hash_of};
use crate::msg::{
    AttestationTally, ConfigResponse, DepositState, DepositStateResponse,
    PendingWithdrawalsResponse, WithdrawalCountResponse, WithdrawalHashResponse,
    WithdrawalResponse, WithdrawalSignatureResponse, WithdrawalSignaturesResponse,
    WithdrawalSignersResponse,
};
use crate::state::{
    CONFIG, DEPOSITS, DEPOSIT_PAYLOADS, DEPOSIT_VOTES, PENDING, WITHDRAWALS, WITHDRAWAL_COUNT,
    WITHDRAWAL_SIGNATURES, WITHDRAWAL_SIGNERS,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        registry: config.registry,
        paused: config.paused,
        max_pending_withdrawals: config.max_pending_withdrawals,
    })
}

pub fn query_deposit(deps: Deps, id: u64) -> StdResult<DepositStateResponse> {
    if let Some(record) = DEPOSITS.may_load(deps.storage, id)? {
        return Ok(DepositStateResponse {
            id,
            state: DepositState::Finalized { record },
        });
    }

    let tallies = DEPOSIT_VOTES
        .tallies(deps.storage, id)?
        .into_iter()
        .map(|(hash, voters)| {
            let payload = DEPOSIT_PAYLOADS.load(deps.storage, (id, hash.clone()))?;
            Ok(AttestationTally {
                payload_hash: HexBinary::from(hash),
                payload,
                voters,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(DepositStateResponse {
        id,
        state: DepositState::Pending { tallies },
    })
}

pub fn query_withdrawal(deps: Deps, id: u64) -> StdResult<WithdrawalResponse> {
    Ok(WithdrawalResponse {
        withdrawal: WITHDRAWALS.may_load(deps.storage, id)?,
    })
}

pub fn query_withdrawal_count(deps: Deps) -> StdResult<WithdrawalCountResponse> {
    Ok(WithdrawalCountResponse {
        count: WITHDRAWAL_COUNT.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_pending_withdrawals(deps: Deps, owner: String) -> StdResult<PendingWithdrawalsResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let ids = PENDING
        .may_load(deps.storage, &owner)?
        .unwrap_or_default()
        .ids();
    let entries = ids
        .iter()
        .map(|id| WITHDRAWALS.load(deps.storage, *id))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(PendingWithdrawalsResponse { ids, entries })
}

pub fn query_withdrawal_signers(deps: Deps, id: u64) -> StdResult<WithdrawalSignersResponse> {
    Ok(WithdrawalSignersResponse {
        signers: WITHDRAWAL_SIGNERS
            .may_load(deps.storage, id)?
            .unwrap_or_default(),
    })
}

pub fn query_withdrawal_signature(
    deps: Deps,
    id: u64,
    signer: String,
) -> StdResult<WithdrawalSignatureResponse> {
    let signer = signer.to_ascii_lowercase();
    Ok(WithdrawalSignatureResponse {
        signature: WITHDRAWAL_SIGNATURES.may_load(deps.storage, (id, signer.as_str()))?,
    })
}

/// Stored signatures of current validators, ascending by signer.
pub fn query_withdrawal_signatures(
    deps: Deps,
    id: u64,
) -> StdResult<WithdrawalSignaturesResponse> {
    let config = CONFIG.load(deps.storage)?;
    let set = current_validators(deps, &config).map_err(|e| StdError::generic_err(e.to_string()))?;
    let current = set.signers();

    let mut signers: Vec<String> = WITHDRAWAL_SIGNERS
        .may_load(deps.storage, id)?
        .unwrap_or_default()
        .into_iter()
        .filter(|signer| current.contains(signer))
        .collect();
    signers.sort();

    let signatures = signers
        .into_iter()
        .map(|signer| {
            let signature = WITHDRAWAL_SIGNATURES.load(deps.storage, (id, signer.as_str()))?;
            Ok(SignatureEntry { signer, signature })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(WithdrawalSignaturesResponse { signatures })
}

pub fn query_withdrawal_hash(deps: Deps, id: u64) -> StdResult<WithdrawalHashResponse> {
    let record = WITHDRAWALS.load(deps.storage, id)?;
    Ok(WithdrawalHashResponse {
        hash: HexBinary::from(hash_of(&record).as_slice()),
    })
}
