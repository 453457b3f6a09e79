//! Hash computation shared by both gateways.
//!
//! # Withdrawal hash layout (160 bytes before hashing)
//! - Bytes 0-31:    keccak256 of the tag (`withdrawToken` or `withdrawNft`)
//! - Bytes 32-63:   withdrawal id (uint256, big-endian, left-padded)
//! - Bytes 64-95:   keccak256 of the recipient address string
//! - Bytes 96-127:  keccak256 of the mainchain token identifier
//! - Bytes 128-159: amount or token id (uint256, big-endian, left-padded)
//!
//! Native coin and fungible tokens share the `withdrawToken` tag.

use cosmwasm_std::{to_json_vec, StdResult, Uint128};
use serde::Serialize;
use tiny_keccak::{Hasher, Keccak};

use crate::asset::TokenStandard;

const TOKEN_WITHDRAWAL_TAG: &[u8] = b"withdrawToken";
const NFT_WITHDRAWAL_TAG: &[u8] = b"withdrawNft";

/// Prefix used by `eth_sign` / `personal_sign` for 32-byte digests.
const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Canonical hash validators sign to authorize a withdrawal on the mainchain.
pub fn withdrawal_hash(
    id: u64,
    recipient: &str,
    token: &str,
    standard: TokenStandard,
    amount: Uint128,
) -> [u8; 32] {
    let tag = match standard {
        TokenStandard::NonFungible => NFT_WITHDRAWAL_TAG,
        TokenStandard::Native | TokenStandard::Fungible => TOKEN_WITHDRAWAL_TAG,
    };

    let mut data = [0u8; 160];
    data[0..32].copy_from_slice(&keccak256(tag));
    data[32 + 24..64].copy_from_slice(&id.to_be_bytes());
    data[64..96].copy_from_slice(&keccak256(recipient.as_bytes()));
    data[96..128].copy_from_slice(&keccak256(token.as_bytes()));
    data[128 + 16..160].copy_from_slice(&amount.u128().to_be_bytes());

    keccak256(&data)
}

/// keccak256 over the JSON encoding of a message payload.
///
/// Used to key ballots: two voters agree only on byte-identical payloads.
pub fn payload_hash<T: Serialize>(payload: &T) -> StdResult<[u8; 32]> {
    Ok(keccak256(&to_json_vec(payload)?))
}

/// Digest produced by `eth_sign` over a 32-byte hash.
pub fn eth_signed_message_hash(hash: &[u8; 32]) -> [u8; 32] {
    let mut data = Vec::with_capacity(ETH_SIGNED_MESSAGE_PREFIX.len() + 32);
    data.extend_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    data.extend_from_slice(hash);
    keccak256(&data)
}

/// Convert bytes32 to hex string with 0x prefix
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
