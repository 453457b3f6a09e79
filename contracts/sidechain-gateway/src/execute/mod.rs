//! Execute handlers for the sidechain gateway.
//!
//! - `deposit` - validator attestations of mainchain deposits
//! - `withdraw` - withdrawal intents and the pending queue
//! - `signatures` - validator signature collection
//! - `acknowledge` - validator acknowledgements of mainchain execution
//! - `admin` - pause, unpause, admin change

mod acknowledge;
mod admin;
mod deposit;
mod signatures;
mod withdraw;

pub use acknowledge::*;
pub use admin::*;
pub use deposit::*;
pub use signatures::*;
pub use withdraw::*;

use common::{names, withdrawal_hash, TokenStandard};
use cosmwasm_std::{Deps, Storage};
use registry::helpers::contract_address;
use validator_set::helpers::snapshot;
use validator_set::msg::SnapshotResponse;

use crate::error::ContractError;
use crate::state::{Config, WithdrawalRecord, CONFIG};

fn load_unpaused(storage: &dyn Storage) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    Ok(config)
}

/// Current sidechain validator set, resolved through the registry.
pub(crate) fn current_validators(
    deps: Deps,
    config: &Config,
) -> Result<SnapshotResponse, ContractError> {
    let validator_set = contract_address(&deps.querier, &config.registry, names::VALIDATOR)?;
    Ok(snapshot(&deps.querier, &validator_set)?)
}

/// Native coin lives on the sidechain as a CW20.
fn custody_standard(standard: TokenStandard) -> TokenStandard {
    match standard {
        TokenStandard::Native => TokenStandard::Fungible,
        other => other,
    }
}

pub(crate) fn hash_of(record: &WithdrawalRecord) -> [u8; 32] {
    withdrawal_hash(
        record.id,
        &record.recipient,
        &record.counterpart_token,
        record.standard,
        record.amount,
    )
}
