//! State definitions for the validator set.

use common::{Quorum, VoteBook};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::msg::{Validator, ValidatorChange};

pub const CONTRACT_NAME: &str = "crates.io:bridge-validator-set";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Validator Configuration
// ============================================================================

/// Versioned validator configuration.
///
/// Only ever replaced wholesale by [`ValidatorConfig::apply`].
#[cw_serde]
pub struct ValidatorConfig {
    pub validators: Vec<Validator>,
    pub quorum: Quorum,
    /// Period of the last applied change
    pub period: Option<u64>,
    /// Payload hash of the last applied change
    pub last_change: Option<HexBinary>,
}

impl ValidatorConfig {
    pub fn is_member(&self, address: &Addr) -> bool {
        self.validators.iter().any(|v| v.address == *address)
    }

    pub fn signer_of(&self, address: &Addr) -> Option<&str> {
        self.validators
            .iter()
            .find(|v| v.address == *address)
            .map(|v| v.signer.as_str())
    }

    pub fn signers(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.signer.clone()).collect()
    }

    pub fn member_count(&self) -> u64 {
        self.validators.len() as u64
    }

    /// Rejects periods at or below the last applied one.
    pub fn check_period(&self, period: u64) -> Result<(), ContractError> {
        match self.period {
            Some(last) if period <= last => Err(ContractError::StalePeriod { period, last }),
            _ => Ok(()),
        }
    }

    /// The configuration after `change`, recorded as applied in `period`.
    ///
    /// `change` must already be normalized (validated address, lowercase signer).
    pub fn apply(
        &self,
        period: u64,
        change: &ValidatorChange,
        payload_hash: &[u8; 32],
    ) -> Result<ValidatorConfig, ContractError> {
        let mut next = self.clone();
        match change {
            ValidatorChange::AddValidator { address, signer } => {
                if next.validators.iter().any(|v| v.address == *address) {
                    return Err(ContractError::DuplicateValidator {
                        address: address.clone(),
                    });
                }
                if next.validators.iter().any(|v| v.signer == *signer) {
                    return Err(ContractError::DuplicateSigner {
                        signer: signer.clone(),
                    });
                }
                next.validators.push(Validator {
                    address: Addr::unchecked(address),
                    signer: signer.clone(),
                });
            }
            ValidatorChange::RemoveValidator { address } => {
                let position = next
                    .validators
                    .iter()
                    .position(|v| v.address == *address)
                    .ok_or_else(|| ContractError::NotAValidator {
                        address: address.clone(),
                    })?;
                if next.validators.len() == 1 {
                    return Err(ContractError::CannotRemoveLastValidator);
                }
                next.validators.remove(position);
            }
            ValidatorChange::UpdateQuorum { num, denom } => {
                next.quorum = Quorum::new(*num, *denom)?;
            }
        }
        next.period = Some(period);
        next.last_change = Some(HexBinary::from(payload_hash.as_slice()));
        Ok(next)
    }
}

pub const VALIDATOR_CONFIG: Item<ValidatorConfig> = Item::new("validator_config");

/// Set in sidechain mode: the only address allowed to sync changes
pub const ACKNOWLEDGEMENT: Item<Addr> = Item::new("acknowledgement");

// ============================================================================
// Governance Ballots
// ============================================================================

/// Ballots per (period, change hash)
pub const VOTES: VoteBook = VoteBook::new("vote_tallies", "vote_ballots");

/// (period, change hash) => proposed change, for display in `Votes`
pub const PROPOSALS: Map<(u64, Vec<u8>), ValidatorChange> = Map::new("proposals");
