//! Message types for the token remote contract

use common::{FeeInfo, SendTokensInput};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub messenger: String,
    pub home_blockchain_id: Binary,
    pub home_transferrer_address: String,
    /// Synthetic CW20 token; this contract must be (or become) its minter
    pub token: String,
    pub home_token_decimals: u8,
    /// Supply already minted on this chain before registration, in remote
    /// units
    pub initial_reserve_imbalance: Uint128,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Ask the home to register this remote
    RegisterWithHome { fee_info: FeeInfo },

    /// Burn `amount` and release the home tokens to `recipient` on the home
    /// chain. Returns `SendTokensResponse` (home units) as data.
    SendToHome {
        recipient: String,
        primary_fee_token_address: String,
        primary_fee: Uint128,
        required_gas_limit: u64,
        amount: Uint128,
    },

    /// Burn `amount` and route it through the home to another remote.
    /// `input.required_gas_limit` applies to the second hop.
    SendAndForward {
        input: SendTokensInput,
        amount: Uint128,
    },

    /// Called by the messenger with a payload from the home
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

    #[returns(StatusResponse)]
    Status {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub messenger: String,
    pub home_blockchain_id: Binary,
    pub home_transferrer_address: String,
    pub token: String,
    pub token_decimals: u8,
    pub home_token_decimals: u8,
    pub token_multiplier: Uint128,
    pub multiply_on_remote: bool,
    pub initial_reserve_imbalance: Uint128,
}

#[cw_serde]
pub struct StatusResponse {
    pub is_collateralized: bool,
    pub total_supply: Uint128,
    pub total_sent_to_home: u64,
    pub total_forwarded: u64,
    pub total_received: u64,
}
