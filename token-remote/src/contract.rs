//! Token Remote Contract - Entry Points

use common::{chain_id_hex, parse_chain_id, TokenScale};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use cw20::{Cw20QueryMsg, TokenInfoResponse};
use messenger::msg::{ConfigResponse as MessengerConfigResponse, QueryMsg as MessengerQueryMsg};

use crate::error::ContractError;
use crate::execute::{
    execute_handle_cross_chain_message, execute_register_with_home, execute_send_and_forward,
    execute_send_to_home,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_config, query_status};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, IS_COLLATERALIZED, STATS,
};

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

    let messenger = deps.api.addr_validate(&msg.messenger)?;
    let token = deps.api.addr_validate(&msg.token)?;

    let home_blockchain_id =
        parse_chain_id(&msg.home_blockchain_id).ok_or_else(|| ContractError::InvalidChainId {
            reason: "home_blockchain_id must be 4 bytes and not 0x00000000".to_string(),
        })?;
    let messenger_config: MessengerConfigResponse = deps
        .querier
        .query_wasm_smart(&messenger, &MessengerQueryMsg::Config {})?;
    if messenger_config.blockchain_id.as_slice() == home_blockchain_id.as_slice() {
        return Err(ContractError::InvalidChainId {
            reason: "the home must be on another chain".to_string(),
        });
    }
    if msg.home_transferrer_address.is_empty() {
        return Err(ContractError::InvalidHomeAddress);
    }

    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::TokenInfo {})?;
    let scale = TokenScale::from_decimals(msg.home_token_decimals, token_info.decimals).ok_or(
        ContractError::InvalidDecimals {
            home_decimals: msg.home_token_decimals,
            remote_decimals: token_info.decimals,
        },
    )?;

    CONFIG.save(
        deps.storage,
        &Config {
            messenger,
            home_blockchain_id,
            home_transferrer_address: msg.home_transferrer_address.clone(),
            token: token.clone(),
            token_decimals: token_info.decimals,
            home_token_decimals: msg.home_token_decimals,
            scale,
            initial_reserve_imbalance: msg.initial_reserve_imbalance,
        },
    )?;
    IS_COLLATERALIZED.save(deps.storage, &msg.initial_reserve_imbalance.is_zero())?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("home_blockchain_id", chain_id_hex(&home_blockchain_id))
        .add_attribute("home_transferrer_address", msg.home_transferrer_address)
        .add_attribute("token", token)
        .add_attribute(
            "initial_reserve_imbalance",
            msg.initial_reserve_imbalance.to_string(),
        ))
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
        ExecuteMsg::RegisterWithHome { fee_info } => {
            execute_register_with_home(deps, env, info, fee_info)
        }
        ExecuteMsg::SendToHome {
            recipient,
            primary_fee_token_address,
            primary_fee,
            required_gas_limit,
            amount,
        } => execute_send_to_home(
            deps,
            env,
            info,
            recipient,
            primary_fee_token_address,
            primary_fee,
            required_gas_limit,
            amount,
        ),
        ExecuteMsg::SendAndForward { input, amount } => {
            execute_send_and_forward(deps, env, info, input, amount)
        }
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
        QueryMsg::Status {} => to_json_binary(&query_status(deps)?),
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
