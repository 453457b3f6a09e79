//! Query handlers for the validator set.

use common::verify_signature_bundle;
use cosmwasm_std::{Deps, HexBinary, StdError, StdResult};

use crate::msg::{
    IsValidatorResponse, QuorumResponse, SnapshotResponse, ValidatorsResponse,
    VerifySignaturesResponse, VoteTally, VotesResponse,
};
use crate::state::{PROPOSALS, VALIDATOR_CONFIG, VOTES};
use common::SignatureEntry;

pub fn query_is_validator(deps: Deps, address: String) -> StdResult<IsValidatorResponse> {
    let address = deps.api.addr_validate(&address)?;
    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    let signer = config.signer_of(&address).map(str::to_string);
    Ok(IsValidatorResponse {
        is_validator: signer.is_some(),
        signer,
    })
}

pub fn query_quorum(deps: Deps) -> StdResult<QuorumResponse> {
    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    Ok(QuorumResponse {
        num: config.quorum.num,
        denom: config.quorum.denom,
        min_validators: config.quorum.min_signers(config.member_count()),
    })
}

pub fn query_validators(deps: Deps) -> StdResult<ValidatorsResponse> {
    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    Ok(ValidatorsResponse {
        validators: config.validators,
    })
}

pub fn query_snapshot(deps: Deps) -> StdResult<SnapshotResponse> {
    let config = VALIDATOR_CONFIG.load(deps.storage)?;
    Ok(SnapshotResponse {
        validators: config.validators,
        quorum: config.quorum,
        period: config.period,
    })
}

pub fn query_votes(deps: Deps, period: u64) -> StdResult<VotesResponse> {
    let tallies = VOTES
        .tallies(deps.storage, period)?
        .into_iter()
        .map(|(hash, voters)| {
            let change = PROPOSALS.load(deps.storage, (period, hash.clone()))?;
            Ok(VoteTally {
                payload_hash: HexBinary::from(hash),
                change,
                voters,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(VotesResponse { period, tallies })
}

pub fn query_verify_signatures(
    deps: Deps,
    message_hash: HexBinary,
    signatures: Vec<SignatureEntry>,
) -> StdResult<VerifySignaturesResponse> {
    let hash: [u8; 32] = message_hash
        .as_slice()
        .try_into()
        .map_err(|_| StdError::generic_err("message_hash must be 32 bytes"))?;
    let config = VALIDATOR_CONFIG.load(deps.storage)?;

    let signers = verify_signature_bundle(
        deps.api,
        &config.signers(),
        &config.quorum,
        &hash,
        &signatures,
    )
    .map_err(|e| StdError::generic_err(e.to_string()))?;

    Ok(VerifySignaturesResponse { signers })
}
