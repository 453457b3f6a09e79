//! State definitions for the sidechain gateway.

use common::{TokenStandard, VoteBook};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::msg::DepositPayload;

pub const CONTRACT_NAME: &str = "crates.io:bridge-sidechain-gateway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MAX_PENDING_WITHDRAWALS: u32 = 10;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Registry resolving `validator`, `wrapped_native`
    /// and the token mapping
    pub registry: Addr,
    pub paused: bool,
    /// Capacity of each owner's pending withdrawal queue
    pub max_pending_withdrawals: u32,
}

pub const CONFIG: Item<Config> = Item::new("config");

// ============================================================================
// Deposits (attested by validators)
// ============================================================================

/// A deposit finalized by validator quorum and released to its owner.
#[cw_serde]
pub struct DepositRecord {
    pub id: u64,
    pub owner: Addr,
    /// Sidechain token released
    pub token: String,
    /// Mainchain token that was locked
    pub counterpart_token: String,
    pub standard: TokenStandard,
    pub amount: Uint128,
}

/// Attestations per (deposit id, payload hash)
pub const DEPOSIT_VOTES: VoteBook = VoteBook::new("deposit_tallies", "deposit_ballots");

/// (deposit id, payload hash) => attested payload
pub const DEPOSIT_PAYLOADS: Map<(u64, Vec<u8>), DepositPayload> = Map::new("deposit_payloads");

/// Finalized deposits
pub const DEPOSITS: Map<u64, DepositRecord> = Map::new("deposits");

// ============================================================================
// Withdrawals
// ============================================================================

#[cw_serde]
pub struct WithdrawalRecord {
    pub id: u64,
    /// Sidechain account that escrowed the asset
    pub owner: Addr,
    /// Mainchain recipient the validators sign for
    pub recipient: String,
    /// Sidechain token escrowed
    pub token: String,
    /// Mainchain token to release
    pub counterpart_token: String,
    pub standard: TokenStandard,
    pub amount: Uint128,
    /// Set once a validator quorum acknowledges execution on the mainchain
    pub executed: bool,
    /// Slot in the owner's pending queue
    pub slot: u32,
}

/// Number of withdrawals so far; the next withdrawal id
pub const WITHDRAWAL_COUNT: Item<u64> = Item::new("withdrawal_count");

pub const WITHDRAWALS: Map<u64, WithdrawalRecord> = Map::new("withdrawals");

/// (withdrawal id, signer) => 66-byte signature
pub const WITHDRAWAL_SIGNATURES: Map<(u64, &str), HexBinary> = Map::new("withdrawal_signatures");

/// withdrawal id => signers in submission order
pub const WITHDRAWAL_SIGNERS: Map<u64, Vec<String>> = Map::new("withdrawal_signers");

/// Validator acknowledgements per (withdrawal id, withdrawal hash)
pub const ACK_VOTES: VoteBook = VoteBook::new("ack_tallies", "ack_ballots");

// ============================================================================
// Pending Withdrawal Queue
// ============================================================================

/// Per-owner queue of unacknowledged withdrawals.
///
/// Arena of slots plus a free list: insert and remove are O(1), freed slots
/// are reused and listing follows slot order.
#[cw_serde]
#[derive(Default)]
pub struct PendingQueue {
    pub slots: Vec<Option<u64>>,
    pub free: Vec<u32>,
}

impl PendingQueue {
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `id` and return its slot.
    pub fn insert(&mut self, id: u64, capacity: u32) -> Result<u32, ContractError> {
        if self.len() >= capacity as usize {
            return Err(ContractError::CapacityExceeded { capacity });
        }
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(id);
            return Ok(slot);
        }
        self.slots.push(Some(id));
        Ok((self.slots.len() - 1) as u32)
    }

    /// Free `slot` if it still holds `id`.
    pub fn remove(&mut self, slot: u32, id: u64) -> bool {
        match self.slots.get_mut(slot as usize) {
            Some(entry) if *entry == Some(id) => {
                *entry = None;
                self.free.push(slot);
                true
            }
            _ => false,
        }
    }

    /// Pending ids in slot order.
    pub fn ids(&self) -> Vec<u64> {
        self.slots.iter().flatten().copied().collect()
    }
}

/// owner => pending queue
pub const PENDING: Map<&Addr, PendingQueue> = Map::new("pending_withdrawals");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_enforces_capacity() {
        let mut queue = PendingQueue::default();
        for id in 0..10 {
            assert_eq!(queue.insert(id, 10).unwrap(), id as u32);
        }
        assert_eq!(
            queue.insert(10, 10),
            Err(ContractError::CapacityExceeded { capacity: 10 })
        );

        assert!(queue.remove(3, 3));
        assert_eq!(queue.len(), 9);
        assert_eq!(queue.insert(10, 10).unwrap(), 3);
        assert_eq!(queue.ids(), vec![0, 1, 2, 10, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_queue_remove_checks_occupant() {
        let mut queue = PendingQueue::default();
        let slot = queue.insert(7, 2).unwrap();
        assert!(!queue.remove(slot, 8));
        assert!(!queue.remove(5, 7));
        assert!(queue.remove(slot, 7));
        assert!(!queue.remove(slot, 7));
        assert!(queue.is_empty());
    }
}
