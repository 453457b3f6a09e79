use common::VoteBook;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use crate::msg::GovernanceAction;

pub const CONTRACT_NAME: &str = "crates.io:bridge-acknowledgement";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Bootstrap admin, only used to set the first validator contract
    pub admin: Addr,
    /// Sidechain validator set whose quorum governs this contract
    pub validator_contract: Option<Addr>,
    /// Last governance period that applied an action
    pub last_period: Option<u64>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// operator => enabled
pub const OPERATORS: Map<&Addr, bool> = Map::new("operators");

pub const VOTES: VoteBook = VoteBook::new("gov_tallies", "gov_ballots");

/// Sidechain validators confirming a mainchain validator change, keyed by
/// the mainchain period
pub const RELAY_VOTES: VoteBook = VoteBook::new("relay_tallies", "relay_ballots");

/// period => hash of the change forwarded to the validator set
pub const RELAYED: Map<u64, Vec<u8>> = Map::new("relayed");

/// (period, action hash) => action
pub const PROPOSALS: Map<(u64, Vec<u8>), GovernanceAction> = Map::new("proposals");
