//! Message types for the token home contract

use common::SendTokensInput;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub messenger: String,
    /// Home CW20 token; its decimals are read at instantiation
    pub token: String,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a remote with an explicit collateral requirement and
    /// decimals multiplier (admin only)
    RegisterDestination {
        remote_blockchain_id: Binary,
        remote_transferrer_address: String,
        required_collateral: Uint128,
        token_multiplier: Uint128,
        multiply_on_remote: bool,
    },

    /// Provide collateral for a registered remote. Only the amount still
    /// needed is taken. Returns `AddCollateralResponse` as data.
    AddCollateral {
        remote_blockchain_id: Binary,
        remote_transferrer_address: String,
        amount: Uint128,
    },

    /// Lock `amount` home tokens and send them to a secured remote.
    /// Returns `SendTokensResponse` as data.
    Send {
        input: SendTokensInput,
        amount: Uint128,
    },

    /// Called by the messenger with a payload from a remote
    HandleCrossChainMessage {
        source_blockchain_id: Binary,
        origin_sender_address: String,
        message: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(RemoteSettingsResponse)]
    RemoteSettings {
        remote_blockchain_id: Binary,
        remote_transferrer_address: String,
    },

    #[returns(RemotesResponse)]
    Remotes {
        start_after: Option<RemoteKey>,
        limit: Option<u32>,
    },

    #[returns(StatsResponse)]
    Stats {},
}

#[cw_serde]
pub struct RemoteKey {
    pub blockchain_id: Binary,
    pub transferrer_address: String,
}

#[cw_serde]
pub struct AddCollateralResponse {
    /// Amount actually taken from the caller
    pub contributed: Uint128,
    /// Collateral still needed after this contribution
    pub collateral_needed: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub messenger: String,
    pub token: String,
    pub token_decimals: u8,
}

#[cw_serde]
pub struct RemoteSettingsResponse {
    pub remote_blockchain_id: Binary,
    pub remote_transferrer_address: String,
    pub required_collateral: Uint128,
    pub collateral_needed: Uint128,
    pub collateral_provided: Uint128,
    pub token_multiplier: Uint128,
    pub multiply_on_remote: bool,
    pub transferred_balance: Uint128,
    pub secured: bool,
}

#[cw_serde]
pub struct RemotesResponse {
    pub remotes: Vec<RemoteSettingsResponse>,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_sent: u64,
    pub total_withdrawn: u64,
    pub total_routed: u64,
}
