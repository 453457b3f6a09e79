//! Acknowledgement of withdrawals executed on the mainchain.

use common::ballot::count_members;
use common::{bytes32_to_hex, Ballot};
use cosmwasm_std::{Addr, DepsMut, Event, MessageInfo, Response};

use super::{current_validators, hash_of};
use crate::error::ContractError;
use crate::state::{ACK_VOTES, CONFIG, PENDING, WITHDRAWALS};

pub fn execute_acknowledge_withdrawal(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    execute_batch_acknowledge_withdrawals(deps, info, vec![id])
}

/// Validator ballots that a withdrawal was executed on the mainchain.
///
/// A withdrawal leaves its owner's pending queue only once a quorum of the
/// current validators has acknowledged it. Repeats are no-ops, so relayers
/// may acknowledge at-least-once.
pub fn execute_batch_acknowledge_withdrawals(
    deps: DepsMut,
    info: MessageInfo,
    ids: Vec<u64>,
) -> Result<Response, ContractError> {
    if ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }

    let config = CONFIG.load(deps.storage)?;
    let set = current_validators(deps.as_ref(), &config)?;
    let is_member = |addr: &Addr| set.is_member(addr);
    if !is_member(&info.sender) {
        return Err(ContractError::NotValidator);
    }
    let members = set.member_count();

    let mut response = Response::new()
        .add_attribute("action", "acknowledge_withdrawals")
        .add_attribute("validator", info.sender.as_str());

    for id in ids {
        let mut record = WITHDRAWALS
            .may_load(deps.storage, id)?
            .ok_or(ContractError::UnknownWithdrawal { id })?;
        let hash = hash_of(&record);

        let mut event = Event::new("withdrawal_acknowledgement")
            .add_attribute("withdrawal_id", id.to_string())
            .add_attribute("owner", record.owner.as_str())
            .add_attribute("withdrawal_hash", bytes32_to_hex(&hash));

        let status = if record.executed {
            "already_acknowledged"
        } else {
            match ACK_VOTES.cast(deps.storage, id, &hash, &info.sender)? {
                Ballot::Repeated => "duplicate_vote",
                Ballot::Recorded { voters } => {
                    let count = count_members(&voters, is_member);
                    event = event.add_attribute("votes", count.to_string());
                    if set.quorum.is_reached(count, members) {
                        let mut queue = PENDING
                            .may_load(deps.storage, &record.owner)?
                            .unwrap_or_default();
                        queue.remove(record.slot, id);
                        PENDING.save(deps.storage, &record.owner, &queue)?;

                        record.executed = true;
                        WITHDRAWALS.save(deps.storage, id, &record)?;
                        "acknowledged"
                    } else {
                        "pending"
                    }
                }
            }
        };

        response = response.add_event(event.add_attribute("status", status));
    }

    Ok(response)
}
