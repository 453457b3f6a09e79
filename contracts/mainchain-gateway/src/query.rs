//! Query handlers for the mainchain gateway.

use common::{withdrawal_hash, TokenStandard};
use cosmwasm_std::{Deps, HexBinary, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::msg::{
    ConfigResponse, DepositCountResponse, DepositResponse, DepositsResponse,
    WithdrawalHashResponse, WithdrawalResponse,
};
use crate::state::{CONFIG, DEPOSITS, DEPOSIT_COUNT, WITHDRAWALS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        registry: config.registry,
        paused: config.paused,
    })
}

pub fn query_deposit_count(deps: Deps) -> StdResult<DepositCountResponse> {
    Ok(DepositCountResponse {
        count: DEPOSIT_COUNT.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_deposit(deps: Deps, id: u64) -> StdResult<DepositResponse> {
    Ok(DepositResponse {
        deposit: DEPOSITS.may_load(deps.storage, id)?,
    })
}

pub fn query_deposits(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<DepositsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let deposits = DEPOSITS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| record))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(DepositsResponse { deposits })
}

pub fn query_withdrawal(deps: Deps, id: u64) -> StdResult<WithdrawalResponse> {
    Ok(WithdrawalResponse {
        withdrawal: WITHDRAWALS.may_load(deps.storage, id)?,
    })
}

pub fn query_withdrawal_hash(
    id: u64,
    recipient: String,
    token: String,
    standard: TokenStandard,
    amount: Uint128,
) -> StdResult<WithdrawalHashResponse> {
    let hash = withdrawal_hash(id, &recipient, &token, standard, amount);
    Ok(WithdrawalHashResponse {
        hash: HexBinary::from(hash.as_slice()),
    })
}
