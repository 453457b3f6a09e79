//! Validator keys for tests.

use common::hash::eth_signed_message_hash;
use common::signature::signer_from_public_key;
use cosmwasm_std::{Addr, HexBinary};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// A validator: ledger account plus secp256k1 signing key.
pub struct TestValidator {
    pub address: Addr,
    pub signer: String,
    key: SigningKey,
}

impl TestValidator {
    /// Deterministic validator derived from `seed` (must be non-zero).
    pub fn new(seed: u8) -> Self {
        let mut secret = [0u8; 32];
        secret[0] = 0x42;
        secret[31] = seed;
        let key = SigningKey::from_slice(&secret).expect("valid secp256k1 scalar");
        let point = key.verifying_key().to_encoded_point(false);
        let signer = signer_from_public_key(point.as_bytes()).expect("uncompressed key");
        Self {
            address: Addr::unchecked(format!("terra1validator{seed}")),
            signer,
            key,
        }
    }

    /// 66-byte `eth_sign` style signature (mode 0x01, v = 27/28) over `hash`.
    pub fn sign(&self, hash: &[u8]) -> HexBinary {
        let hash: [u8; 32] = hash.try_into().expect("32-byte hash");
        let digest = eth_signed_message_hash(&hash);
        self.encode(0x01, &digest, 27)
    }

    /// 66-byte signature over `hash` itself (mode 0x00, v = 0/1).
    pub fn sign_raw(&self, hash: &[u8]) -> HexBinary {
        let hash: [u8; 32] = hash.try_into().expect("32-byte hash");
        self.encode(0x00, &hash, 0)
    }

    fn encode(&self, mode: u8, digest: &[u8; 32], v_offset: u8) -> HexBinary {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("signing succeeds");

        let mut bytes = Vec::with_capacity(66);
        bytes.push(mode);
        bytes.extend_from_slice(&signature.to_bytes());
        bytes.push(v_offset + recovery_id.to_byte());
        HexBinary::from(bytes)
    }
}
