//! Signer recovery and signature-bundle verification.
//!
//! A signature is 66 bytes: one mode byte followed by `r ‖ s ‖ v`.
//! - mode `0x00`: the signer signed the 32-byte message hash directly
//! - mode `0x01`: the signer used `eth_sign`, i.e. signed
//!   `keccak256("\x19Ethereum Signed Message:\n32" ‖ hash)`
//!
//! Signers are identified by their Ethereum-style address: the last 20 bytes
//! of keccak256 over the uncompressed public key, as lowercase `0x` hex.
//! Lowercase hex sorts the same way as the underlying bytes, which is what the
//! strictly-ascending bundle rule compares.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, HexBinary};
use thiserror::Error;

use crate::hash::{eth_signed_message_hash, keccak256};
use crate::quorum::Quorum;

/// Mode byte plus 65-byte recoverable ECDSA signature.
pub const SIGNATURE_LENGTH: usize = 66;

const MODE_DIGEST: u8 = 0x00;
const MODE_ETH_SIGN: u8 = 0x01;

#[derive(Error, Debug, PartialEq)]
pub enum SignatureError {
    #[error("Malformed signature: {reason}")]
    Malformed { reason: String },

    #[error("Invalid signer address: {signer}")]
    InvalidSigner { signer: String },

    #[error("Signature declared for {declared} was produced by {recovered}")]
    SignerMismatch { declared: String, recovered: String },

    #[error("Signers must be strictly ascending: {previous} is followed by {next}")]
    NotAscending { previous: String, next: String },

    #[error("{signer} is not a current validator")]
    UnknownSigner { signer: String },

    #[error("Quorum not met: {got} valid signatures, {required} required")]
    QuorumNotMet { got: u64, required: u64 },
}

/// One validator's signature inside a bundle.
#[cw_serde]
pub struct SignatureEntry {
    /// Ethereum-style signer address (`0x` + 40 hex chars)
    pub signer: String,
    /// 66-byte signature (mode byte + r + s + v)
    pub signature: HexBinary,
}

/// Lowercases and checks a `0x`-prefixed 20-byte hex address.
pub fn normalize_signer(signer: &str) -> Result<String, SignatureError> {
    let lower = signer.trim().to_ascii_lowercase();
    let valid = lower.len() == 42
        && lower.starts_with("0x")
        && lower[2..].bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        return Err(SignatureError::InvalidSigner {
            signer: signer.to_string(),
        });
    }
    Ok(lower)
}

/// Address for an uncompressed (65-byte, `0x04`-prefixed) secp256k1 public key.
pub fn signer_from_public_key(public_key: &[u8]) -> Option<String> {
    if public_key.len() != 65 || public_key[0] != 0x04 {
        return None;
    }
    let digest = keccak256(&public_key[1..]);
    Some(format!("0x{}", hex::encode(&digest[12..])))
}

/// Recovers the signer address of `signature` over `message_hash`.
pub fn recover_signer(
    api: &dyn Api,
    message_hash: &[u8; 32],
    signature: &[u8],
) -> Result<String, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::Malformed {
            reason: format!(
                "expected {SIGNATURE_LENGTH} bytes, got {}",
                signature.len()
            ),
        });
    }

    let digest = match signature[0] {
        MODE_DIGEST => *message_hash,
        MODE_ETH_SIGN => eth_signed_message_hash(message_hash),
        mode => {
            return Err(SignatureError::Malformed {
                reason: format!("unknown signature mode {mode}"),
            })
        }
    };

    let recovery_param = match signature[65] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        v => {
            return Err(SignatureError::Malformed {
                reason: format!("invalid recovery byte {v}"),
            })
        }
    };

    let public_key = api
        .secp256k1_recover_pubkey(&digest, &signature[1..65], recovery_param)
        .map_err(|e| SignatureError::Malformed {
            reason: e.to_string(),
        })?;

    signer_from_public_key(&public_key).ok_or_else(|| SignatureError::Malformed {
        reason: "recovered key is not an uncompressed secp256k1 key".to_string(),
    })
}

/// Checks a withdrawal signature bundle against the current validator signers.
///
/// Every entry must recover to its declared signer, signers must be strictly
/// ascending and each must belong to `validator_signers`; the number of
/// entries must then satisfy `quorum` over the full current set. Returns the
/// accepted signers in bundle order.
pub fn verify_signature_bundle(
    api: &dyn Api,
    validator_signers: &[String],
    quorum: &Quorum,
    message_hash: &[u8; 32],
    bundle: &[SignatureEntry],
) -> Result<Vec<String>, SignatureError> {
    let mut accepted: Vec<String> = Vec::with_capacity(bundle.len());

    for entry in bundle {
        let declared = normalize_signer(&entry.signer)?;
        let recovered = recover_signer(api, message_hash, entry.signature.as_slice())?;
        if recovered != declared {
            return Err(SignatureError::SignerMismatch {
                declared,
                recovered,
            });
        }

        if let Some(previous) = accepted.last() {
            if recovered <= *previous {
                return Err(SignatureError::NotAscending {
                    previous: previous.clone(),
                    next: recovered,
                });
            }
        }

        if !validator_signers.iter().any(|signer| *signer == recovered) {
            return Err(SignatureError::UnknownSigner { signer: recovered });
        }

        accepted.push(recovered);
    }

    let members = validator_signers.len() as u64;
    let got = accepted.len() as u64;
    if !quorum.is_reached(got, members) {
        return Err(SignatureError::QuorumNotMet {
            got,
            required: quorum.min_signers(members),
        });
    }

    Ok(accepted)
}
