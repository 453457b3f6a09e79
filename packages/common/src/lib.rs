//! Common - Shared Types and Primitives for the Bridge Contracts
//!
//! This package holds the pure pieces every contract in the workspace relies on:
//!
//! - `quorum` - ceiling-rounded quorum fraction arithmetic
//! - `ballot` - per-round vote book (one ballot per voter, tallies per payload)
//! - `hash` - keccak256 and the canonical withdrawal hash
//! - `signature` - secp256k1 signer recovery and signature-bundle verification
//! - `asset` - token standards and custody messages for locked/released assets
//! - `nft` - the CW721 message subset the gateways speak

pub mod asset;
pub mod ballot;
pub mod hash;
pub mod nft;
pub mod quorum;
pub mod signature;

pub use asset::{lock_fungible, lock_nft, release, AssetError, Release, TokenStandard};
pub use ballot::{Ballot, BallotError, VoteBook};
pub use hash::{bytes32_to_hex, keccak256, payload_hash, withdrawal_hash};
pub use quorum::{Quorum, QuorumError};
pub use signature::{
    normalize_signer, recover_signer, verify_signature_bundle, SignatureEntry, SignatureError,
};

/// Well-known registry entry names.
pub mod names {
    /// Validator-set contract of the ledger the registry lives on.
    pub const VALIDATOR: &str = "validator";
    /// Acknowledgement contract (sidechain only).
    pub const ACKNOWLEDGEMENT: &str = "acknowledgement";
    /// CW20 that mirrors the mainchain native coin on the sidechain.
    pub const WRAPPED_NATIVE: &str = "wrapped_native";
}
