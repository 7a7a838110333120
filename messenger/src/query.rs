//! Query handlers for the messenger contract

use common::{chain_id_binary, parse_chain_id};
use cosmwasm_std::{Binary, Deps, Env, StdError, StdResult};

use crate::hash::{compute_message_id, parse_message_id};
use crate::msg::{
    ConfigResponse, FailedMessageResponse, NextMessageIdResponse, ReceiptQueueSizeResponse,
    ReceiptResponse, RelayerRewardsResponse, SentMessageResponse, TrustedMessengerResponse,
};
use crate::receipt_queue;
use crate::state::{
    MessageStatus, CONFIG, FAILED_EXECUTIONS, MESSAGE_NONCE, RECEIVED_MESSAGES,
    RELAYER_REWARDS, SENT_MESSAGES, TRUSTED_MESSENGERS,
};

fn message_id_arg(raw: &Binary) -> StdResult<[u8; 32]> {
    parse_message_id(raw).ok_or_else(|| {
        StdError::generic_err(format!(
            "Invalid message ID: expected 32 bytes, got {}",
            raw.len()
        ))
    })
}

fn chain_id_arg(raw: &Binary) -> StdResult<[u8; 4]> {
    parse_chain_id(raw)
        .ok_or_else(|| StdError::generic_err("Invalid chain ID: expected 4 non-zero bytes"))
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        blockchain_id: chain_id_binary(&config.blockchain_id),
        admin: config.admin.to_string(),
        message_nonce: MESSAGE_NONCE.load(deps.storage)?,
    })
}

pub fn query_message_received(deps: Deps, message_id: Binary) -> StdResult<bool> {
    let id = message_id_arg(&message_id)?;
    Ok(RECEIVED_MESSAGES.has(deps.storage, &id))
}

pub fn query_sent_message(deps: Deps, message_id: Binary) -> StdResult<SentMessageResponse> {
    let id = message_id_arg(&message_id)?;
    let sent = SENT_MESSAGES.load(deps.storage, &id)?;
    Ok(SentMessageResponse {
        message_id,
        message: sent.message,
        sender: sent.sender.to_string(),
        fee_info: sent.fee_info,
        delivered: sent.status == MessageStatus::Delivered,
    })
}

pub fn query_receipt(deps: Deps, message_id: Binary) -> StdResult<ReceiptResponse> {
    let id = message_id_arg(&message_id)?;
    let received = RECEIVED_MESSAGES.load(deps.storage, &id)?;
    Ok(ReceiptResponse {
        source_blockchain_id: chain_id_binary(&received.source_blockchain_id),
        receipt: received.receipt,
    })
}

pub fn query_relayer_rewards(
    deps: Deps,
    relayer: String,
    fee_token_address: String,
) -> StdResult<RelayerRewardsResponse> {
    let amount = RELAYER_REWARDS
        .may_load(deps.storage, (relayer.as_str(), fee_token_address.as_str()))?
        .unwrap_or_default();
    Ok(RelayerRewardsResponse {
        relayer,
        fee_token_address,
        amount,
    })
}

pub fn query_receipt_queue_size(
    deps: Deps,
    source_blockchain_id: Binary,
) -> StdResult<ReceiptQueueSizeResponse> {
    let chain = chain_id_arg(&source_blockchain_id)?;
    Ok(ReceiptQueueSizeResponse {
        size: receipt_queue::size(deps.storage, &chain)?,
    })
}

pub fn query_failed_message(deps: Deps, message_id: Binary) -> StdResult<FailedMessageResponse> {
    let id = message_id_arg(&message_id)?;
    let execution = FAILED_EXECUTIONS.load(deps.storage, &id)?;
    Ok(FailedMessageResponse {
        message_id,
        source_blockchain_id: chain_id_binary(&execution.source_blockchain_id),
        origin_sender_address: execution.origin_sender_address,
        destination_address: execution.destination_address,
        message: execution.message,
    })
}

pub fn query_next_message_id(
    deps: Deps,
    env: Env,
    destination_blockchain_id: Binary,
) -> StdResult<NextMessageIdResponse> {
    let destination = chain_id_arg(&destination_blockchain_id)?;
    let config = CONFIG.load(deps.storage)?;
    let nonce = MESSAGE_NONCE.load(deps.storage)?;
    let message_id = compute_message_id(
        env.contract.address.as_str(),
        &config.blockchain_id,
        &destination,
        nonce,
    );
    Ok(NextMessageIdResponse {
        message_id: Binary::from(message_id.to_vec()),
    })
}

pub fn query_trusted_messenger(
    deps: Deps,
    blockchain_id: Binary,
) -> StdResult<TrustedMessengerResponse> {
    let chain = chain_id_arg(&blockchain_id)?;
    Ok(TrustedMessengerResponse {
        blockchain_id,
        messenger_address: TRUSTED_MESSENGERS.may_load(deps.storage, &chain)?,
    })
}
