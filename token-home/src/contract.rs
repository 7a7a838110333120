//! Token Home Contract - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use crate::error::ContractError;
use crate::execute::{
    execute_add_collateral, execute_handle_cross_chain_message, execute_register_destination,
    execute_send,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_config, query_remote_settings, query_remotes, query_stats};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STATS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let messenger = deps.api.addr_validate(&msg.messenger)?;
    let token = deps.api.addr_validate(&msg.token)?;

    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::TokenInfo {})?;

    CONFIG.save(
        deps.storage,
        &Config {
            admin: admin.clone(),
            messenger: messenger.clone(),
            token: token.clone(),
            token_decimals: token_info.decimals,
        },
    )?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("messenger", messenger)
        .add_attribute("token", token)
        .add_attribute("token_decimals", token_info.decimals.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterDestination {
            remote_blockchain_id,
            remote_transferrer_address,
            required_collateral,
            token_multiplier,
            multiply_on_remote,
        } => execute_register_destination(
            deps,
            info,
            remote_blockchain_id,
            remote_transferrer_address,
            required_collateral,
            token_multiplier,
            multiply_on_remote,
        ),
        ExecuteMsg::AddCollateral {
            remote_blockchain_id,
            remote_transferrer_address,
            amount,
        } => execute_add_collateral(
            deps,
            env,
            info,
            remote_blockchain_id,
            remote_transferrer_address,
            amount,
        ),
        ExecuteMsg::Send { input, amount } => execute_send(deps, env, info, input, amount),
        ExecuteMsg::HandleCrossChainMessage {
            source_blockchain_id,
            origin_sender_address,
            message,
        } => execute_handle_cross_chain_message(
            deps,
            info,
            source_blockchain_id,
            origin_sender_address,
            message,
        ),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::RemoteSettings {
            remote_blockchain_id,
            remote_transferrer_address,
        } => to_json_binary(&query_remote_settings(
            deps,
            remote_blockchain_id,
            remote_transferrer_address,
        )?),
        QueryMsg::Remotes { start_after, limit } => {
            to_json_binary(&query_remotes(deps, start_after, limit)?)
        }
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
