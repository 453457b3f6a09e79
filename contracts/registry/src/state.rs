use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use crate::msg::TokenMapping;

pub const CONTRACT_NAME: &str = "crates.io:bridge-registry";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ADMIN: Item<Addr> = Item::new("admin");

/// name => contract address
pub const CONTRACTS: Map<&str, Addr> = Map::new("contracts");

/// mainchain token => mapping
pub const MAINCHAIN_MAP: Map<&str, TokenMapping> = Map::new("mainchain_map");

/// sidechain token => mapping
pub const SIDECHAIN_MAP: Map<&str, TokenMapping> = Map::new("sidechain_map");
