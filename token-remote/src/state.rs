//! State definitions for the token remote contract

use common::{ChainId, TokenScale};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

/// Contract name for migration
pub const CONTRACT_NAME: &str = "crates.io:interchain-token-remote";
/// Contract version for migration
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gas required by the home to register this remote
pub const REGISTER_REMOTE_REQUIRED_GAS: u64 = 130_000;
/// Gas required by the home to route a multi-hop send
pub const MULTI_HOP_REQUIRED_GAS: u64 = 340_000;

#[cw_serde]
pub struct Config {
    pub messenger: Addr,
    pub home_blockchain_id: ChainId,
    pub home_transferrer_address: String,
    /// Synthetic CW20 token minted by this contract
    pub token: Addr,
    pub token_decimals: u8,
    pub home_token_decimals: u8,
    /// Conversion between home and remote units
    pub scale: TokenScale,
    /// Supply that existed on this chain before any home transfer, in
    /// remote units
    pub initial_reserve_imbalance: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_sent_to_home: u64,
    pub total_forwarded: u64,
    pub total_received: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Set once a transfer from the home has arrived; the home only sends after
/// the reserve imbalance is backed by collateral.
pub const IS_COLLATERALIZED: Item<bool> = Item::new("is_collateralized");

pub const STATS: Item<Stats> = Item::new("stats");
