//! Message types for the validator set.
//!
//! The types here are also the interface other bridge contracts use to query
//! membership and relay changes.

use common::{Quorum, SignatureEntry};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary};

// ============================================================================
// Shared Types
// ============================================================================

#[cw_serde]
pub struct Validator {
    /// Account that calls bridge contracts
    pub address: Addr,
    /// Lowercase `0x` Ethereum-style address used for withdrawal signatures
    pub signer: String,
}

/// A single membership or quorum change.
///
/// Votes are tallied on the keccak256 of the normalized JSON encoding, so the
/// same change proposed by two validators counts once per voter.
#[cw_serde]
pub enum ValidatorChange {
    AddValidator { address: String, signer: String },
    RemoveValidator { address: String },
    UpdateQuorum { num: u64, denom: u64 },
}

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    pub validators: Vec<ValidatorInit>,
    pub quorum: Quorum,
    /// When set, the set is governed by changes relayed from this contract
    /// instead of by local proposals (sidechain mode)
    pub acknowledgement: Option<String>,
}

#[cw_serde]
pub struct ValidatorInit {
    pub address: String,
    pub signer: String,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Vote for a change in `period`.
    ///
    /// Authorization: current validators (mainchain mode only)
    ///
    /// One ballot per validator per period. Applies once current members
    /// backing the identical change reach quorum.
    ProposeChange {
        period: u64,
        change: ValidatorChange,
    },

    /// Apply a change already agreed on the mainchain.
    ///
    /// Authorization: the acknowledgement contract (sidechain mode only)
    SyncChange {
        period: u64,
        change: ValidatorChange,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(IsValidatorResponse)]
    IsValidator { address: String },

    #[returns(QuorumResponse)]
    Quorum {},

    #[returns(ValidatorsResponse)]
    Validators {},

    /// Members, quorum and last applied period in one read
    #[returns(SnapshotResponse)]
    Snapshot {},

    /// Ballot tallies for a governance period
    #[returns(VotesResponse)]
    Votes { period: u64 },

    /// Verify a signature bundle against the current set; fails when invalid
    #[returns(VerifySignaturesResponse)]
    VerifySignatures {
        message_hash: HexBinary,
        signatures: Vec<SignatureEntry>,
    },
}

#[cw_serde]
pub struct IsValidatorResponse {
    pub is_validator: bool,
    pub signer: Option<String>,
}

#[cw_serde]
pub struct QuorumResponse {
    pub num: u64,
    pub denom: u64,
    /// Minimum number of validators for the current set size
    pub min_validators: u64,
}

#[cw_serde]
pub struct ValidatorsResponse {
    pub validators: Vec<Validator>,
}

#[cw_serde]
pub struct SnapshotResponse {
    pub validators: Vec<Validator>,
    pub quorum: Quorum,
    pub period: Option<u64>,
}

#[cw_serde]
pub struct VoteTally {
    pub payload_hash: HexBinary,
    pub change: ValidatorChange,
    pub voters: Vec<Addr>,
}

#[cw_serde]
pub struct VotesResponse {
    pub period: u64,
    pub tallies: Vec<VoteTally>,
}

#[cw_serde]
pub struct VerifySignaturesResponse {
    pub signers: Vec<String>,
}
