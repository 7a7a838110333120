//! Query handlers for the token home contract

use common::{chain_id_binary, parse_chain_id};
use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    ConfigResponse, RemoteKey, RemoteSettingsResponse, RemotesResponse, StatsResponse,
};
use crate::state::{RemoteSettings, CONFIG, REMOTES, STATS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin.to_string(),
        messenger: config.messenger.to_string(),
        token: config.token.to_string(),
        token_decimals: config.token_decimals,
    })
}

fn remote_response(
    blockchain_id: Binary,
    transferrer_address: String,
    settings: RemoteSettings,
) -> RemoteSettingsResponse {
    RemoteSettingsResponse {
        remote_blockchain_id: blockchain_id,
        remote_transferrer_address: transferrer_address,
        required_collateral: settings.required_collateral,
        collateral_needed: settings.collateral_needed,
        collateral_provided: settings.collateral_provided(),
        token_multiplier: settings.scale.multiplier,
        multiply_on_remote: settings.scale.multiply_on_remote,
        transferred_balance: settings.transferred_balance,
        secured: settings.is_secured(),
    }
}

pub fn query_remote_settings(
    deps: Deps,
    remote_blockchain_id: Binary,
    remote_transferrer_address: String,
) -> StdResult<RemoteSettingsResponse> {
    let chain = parse_chain_id(&remote_blockchain_id)
        .ok_or_else(|| StdError::generic_err("Invalid chain ID: expected 4 non-zero bytes"))?;
    let settings = REMOTES.load(
        deps.storage,
        (chain.as_slice(), remote_transferrer_address.as_str()),
    )?;
    Ok(remote_response(
        chain_id_binary(&chain),
        remote_transferrer_address,
        settings,
    ))
}

pub fn query_remotes(
    deps: Deps,
    start_after: Option<RemoteKey>,
    limit: Option<u32>,
) -> StdResult<RemotesResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start: Option<Bound<(&[u8], &str)>> = start_after.as_ref().map(|key| {
        Bound::exclusive((
            key.blockchain_id.as_slice(),
            key.transferrer_address.as_str(),
        ))
    });

    let remotes = REMOTES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let ((blockchain_id, address), settings) = item?;
            Ok(remote_response(
                Binary::from(blockchain_id),
                address,
                settings,
            ))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RemotesResponse { remotes })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_sent: stats.total_sent,
        total_withdrawn: stats.total_withdrawn,
        total_routed: stats.total_routed,
    })
}
