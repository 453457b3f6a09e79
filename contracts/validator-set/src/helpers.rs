//! Querier helpers for contracts that consult the validator set.

use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

use crate::msg::{QueryMsg, SnapshotResponse};

/// Current members, quorum and period of the set at `validator_set`.
pub fn snapshot(querier: &QuerierWrapper, validator_set: &Addr) -> StdResult<SnapshotResponse> {
    querier.query_wasm_smart(validator_set, &QueryMsg::Snapshot {})
}

impl SnapshotResponse {
    pub fn signer_of(&self, address: &Addr) -> Option<&str> {
        self.validators
            .iter()
            .find(|v| v.address == *address)
            .map(|v| v.signer.as_str())
    }

    pub fn is_member(&self, address: &Addr) -> bool {
        self.signer_of(address).is_some()
    }

    pub fn signers(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.signer.clone()).collect()
    }

    pub fn member_count(&self) -> u64 {
        self.validators.len() as u64
    }
}
