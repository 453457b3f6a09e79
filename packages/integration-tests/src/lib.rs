//! Test harness spanning both ledgers.
//!
//! Each ledger is its own cw-multi-test `App`; the test itself plays the
//! relayer, carrying events and signatures from one chain to the other.
//!
//! - `nft` - minimal CW721 collection the gateways can lock, transfer and mint
//! - `signer` - secp256k1 validator keys producing bridge signatures
//! - `suite` - both deployments wired together with token mappings

pub mod nft;
pub mod signer;
pub mod suite;

pub use signer::TestValidator;
pub use suite::{Suite, ADMIN, ALICE, BOB, NATIVE_DENOM, RELAYER};
