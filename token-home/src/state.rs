//! State definitions for the token home contract

use common::TokenScale;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract name for migration
pub const CONTRACT_NAME: &str = "crates.io:interchain-token-home";
/// Contract version for migration
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Registers destinations
    pub admin: Addr,
    /// Local messenger contract
    pub messenger: Addr,
    /// Home CW20 token
    pub token: Addr,
    /// Decimals of the home token
    pub token_decimals: u8,
}

/// Collateral ledger entry for one (remote chain, remote transferrer)
#[cw_serde]
pub struct RemoteSettings {
    /// Collateral required before the first send, in home units
    pub required_collateral: Uint128,
    /// Collateral still missing; the remote is secured once this is zero
    pub collateral_needed: Uint128,
    /// Decimals conversion toward the remote
    pub scale: TokenScale,
    /// Home tokens locked on behalf of the remote
    pub transferred_balance: Uint128,
}

impl RemoteSettings {
    pub fn is_secured(&self) -> bool {
        self.collateral_needed.is_zero()
    }

    pub fn collateral_provided(&self) -> Uint128 {
        self.required_collateral - self.collateral_needed
    }
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_sent: u64,
    pub total_withdrawn: u64,
    pub total_routed: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Remotes keyed by (blockchain ID, transferrer address)
pub const REMOTES: Map<(&[u8], &str), RemoteSettings> = Map::new("remotes");

pub const STATS: Item<Stats> = Item::new("stats");
