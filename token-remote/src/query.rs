//! Query handlers for the token remote contract

use common::chain_id_binary;
use cosmwasm_std::{Deps, StdResult};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use crate::msg::{ConfigResponse, StatusResponse};
use crate::state::{CONFIG, IS_COLLATERALIZED, STATS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        messenger: config.messenger.to_string(),
        home_blockchain_id: chain_id_binary(&config.home_blockchain_id),
        home_transferrer_address: config.home_transferrer_address,
        token: config.token.to_string(),
        token_decimals: config.token_decimals,
        home_token_decimals: config.home_token_decimals,
        token_multiplier: config.scale.multiplier,
        multiply_on_remote: config.scale.multiply_on_remote,
        initial_reserve_imbalance: config.initial_reserve_imbalance,
    })
}

pub fn query_status(deps: Deps) -> StdResult<StatusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let stats = STATS.load(deps.storage)?;
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&config.token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(StatusResponse {
        is_collateralized: IS_COLLATERALIZED.load(deps.storage)?,
        total_supply: token_info.total_supply,
        total_sent_to_home: stats.total_sent_to_home,
        total_forwarded: stats.total_forwarded,
        total_received: stats.total_received,
    })
}
