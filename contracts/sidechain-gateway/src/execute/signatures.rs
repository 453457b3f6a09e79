//! Validator signature collection for withdrawals.

use common::{recover_signer, SignatureError};
use cosmwasm_std::{DepsMut, Event, HexBinary, MessageInfo, Response};

use super::{current_validators, hash_of};
use crate::error::ContractError;
use crate::msg::SignatureSubmission;
use crate::state::{CONFIG, WITHDRAWALS, WITHDRAWAL_SIGNATURES, WITHDRAWAL_SIGNERS};

pub fn execute_submit_withdrawal_signatures(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
    replace: bool,
    signature: HexBinary,
) -> Result<Response, ContractError> {
    execute_batch_submit_withdrawal_signatures(
        deps,
        info,
        vec![SignatureSubmission {
            id,
            replace,
            signature,
        }],
    )
}

pub fn execute_batch_submit_withdrawal_signatures(
    deps: DepsMut,
    info: MessageInfo,
    submissions: Vec<SignatureSubmission>,
) -> Result<Response, ContractError> {
    if submissions.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let config = CONFIG.load(deps.storage)?;
    let set = current_validators(deps.as_ref(), &config)?;
    let signer = set
        .signer_of(&info.sender)
        .ok_or(ContractError::NotValidator)?
        .to_string();

    let mut response = Response::new()
        .add_attribute("action", "submit_withdrawal_signatures")
        .add_attribute("validator", info.sender.as_str())
        .add_attribute("signer", signer.as_str());

    for submission in submissions {
        let id = submission.id;
        let record = WITHDRAWALS
            .may_load(deps.storage, id)?
            .ok_or(ContractError::UnknownWithdrawal { id })?;
        if record.executed {
            return Err(ContractError::AlreadyProcessed { id });
        }

        let recovered = recover_signer(deps.api, &hash_of(&record), submission.signature.as_slice())?;
        if recovered != signer {
            return Err(SignatureError::SignerMismatch {
                declared: signer,
                recovered,
            }
            .into());
        }

        let key = (id, signer.as_str());
        let status = match WITHDRAWAL_SIGNATURES.may_load(deps.storage, key)? {
            Some(existing) if existing == submission.signature => "duplicate_signature",
            Some(_) if !submission.replace => {
                return Err(ContractError::SignatureAlreadySubmitted {
                    id,
                    signer: signer.clone(),
                })
            }
            Some(_) => {
                WITHDRAWAL_SIGNATURES.save(deps.storage, key, &submission.signature)?;
                "replaced"
            }
            None => {
                WITHDRAWAL_SIGNATURES.save(deps.storage, key, &submission.signature)?;
                let mut signers = WITHDRAWAL_SIGNERS
                    .may_load(deps.storage, id)?
                    .unwrap_or_default();
                signers.push(signer.clone());
                WITHDRAWAL_SIGNERS.save(deps.storage, id, &signers)?;
                "stored"
            }
        };

        response = response.add_event(
            Event::new("withdrawal_signature")
                .add_attribute("withdrawal_id", id.to_string())
                .add_attribute("status", status),
        );
    }

    Ok(response)
}
