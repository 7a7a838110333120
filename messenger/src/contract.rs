//! Interchain Messenger Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use common::{chain_id_hex, parse_chain_id};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_fee_amount, execute_receive_cross_chain_message,
    execute_redeem_relayer_rewards, execute_retry_message_execution,
    execute_send_cross_chain_message, execute_send_specified_receipts,
    execute_set_trusted_messenger, handle_execution_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_failed_message, query_message_received, query_next_message_id,
    query_receipt, query_receipt_queue_size, query_relayer_rewards, query_sent_message,
    query_trusted_messenger,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MESSAGE_NONCE, NEXT_REPLY_ID,
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

    let blockchain_id =
        parse_chain_id(&msg.blockchain_id).ok_or_else(|| ContractError::InvalidChainId {
            reason: "blockchain_id must be 4 bytes and not 0x00000000".to_string(),
        })?;

    let admin = deps.api.addr_validate(&msg.admin)?;

    CONFIG.save(
        deps.storage,
        &Config {
            blockchain_id,
            admin: admin.clone(),
        },
    )?;
    MESSAGE_NONCE.save(deps.storage, &0u64)?;
    NEXT_REPLY_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("blockchain_id", chain_id_hex(&blockchain_id))
        .add_attribute("admin", admin))
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
        ExecuteMsg::SendCrossChainMessage(input) => {
            execute_send_cross_chain_message(deps, env, info, input)
        }
        ExecuteMsg::AddFeeAmount {
            message_id,
            fee_token_address,
            additional_fee_amount,
        } => execute_add_fee_amount(
            deps,
            env,
            info,
            message_id,
            fee_token_address,
            additional_fee_amount,
        ),
        ExecuteMsg::ReceiveCrossChainMessage {
            source_blockchain_id,
            source_messenger_address,
            message,
            relayer_reward_address,
        } => execute_receive_cross_chain_message(
            deps,
            info,
            source_blockchain_id,
            source_messenger_address,
            message,
            relayer_reward_address,
        ),
        ExecuteMsg::RetryMessageExecution { message_id } => {
            execute_retry_message_execution(deps, message_id)
        }
        ExecuteMsg::SendSpecifiedReceipts {
            source_blockchain_id,
            message_ids,
            fee_info,
            allowed_relayer_addresses,
        } => execute_send_specified_receipts(
            deps,
            env,
            info,
            source_blockchain_id,
            message_ids,
            fee_info,
            allowed_relayer_addresses,
        ),
        ExecuteMsg::RedeemRelayerRewards { fee_token_address } => {
            execute_redeem_relayer_rewards(deps, info, fee_token_address)
        }
        ExecuteMsg::SetTrustedMessenger {
            blockchain_id,
            messenger_address,
        } => execute_set_trusted_messenger(deps, info, blockchain_id, messenger_address),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    // Every sub-message this contract dispatches is a payload execution
    handle_execution_reply(deps, msg.id, msg.result)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::MessageReceived { message_id } => {
            to_json_binary(&query_message_received(deps, message_id)?)
        }
        QueryMsg::SentMessage { message_id } => {
            to_json_binary(&query_sent_message(deps, message_id)?)
        }
        QueryMsg::Receipt { message_id } => to_json_binary(&query_receipt(deps, message_id)?),
        QueryMsg::RelayerRewards {
            relayer,
            fee_token_address,
        } => to_json_binary(&query_relayer_rewards(deps, relayer, fee_token_address)?),
        QueryMsg::ReceiptQueueSize {
            source_blockchain_id,
        } => to_json_binary(&query_receipt_queue_size(deps, source_blockchain_id)?),
        QueryMsg::FailedMessage { message_id } => {
            to_json_binary(&query_failed_message(deps, message_id)?)
        }
        QueryMsg::TrustedMessenger { blockchain_id } => {
            to_json_binary(&query_trusted_messenger(deps, blockchain_id)?)
        }
        QueryMsg::NextMessageId {
            destination_blockchain_id,
        } => to_json_binary(&query_next_message_id(deps, env, destination_blockchain_id)?),
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
