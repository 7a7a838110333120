//! Incoming message handlers.
//!
//! Delivery is recorded before the payload runs. The payload runs in a
//! reply-always sub-message so that a failing receiver rolls back only its
//! own state while the delivery (and its receipt) stands.

use common::{
    chain_id_binary, chain_id_hex, parse_chain_id, CrossChainMessage, MessageReceipt,
    ReceiverExecuteMsg,
};
use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Event, MessageInfo, Response, StdResult, SubMsg,
    SubMsgResult, WasmMsg,
};

use super::{message_id_from, process_receipts};
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_message_id};
use crate::msg::ReceiveCrossChainMessageResponse;
use crate::receipt_queue;
use crate::state::{
    MessageExecution, PendingExecution, ReceivedMessage, CONFIG, FAILED_EXECUTIONS,
    NEXT_REPLY_ID, PENDING_EXECUTIONS, RECEIVED_MESSAGES, TRUSTED_MESSENGERS,
};

/// Execute handler for a relayer delivering a message from another chain
pub fn execute_receive_cross_chain_message(
    deps: DepsMut,
    info: MessageInfo,
    source_blockchain_id: Binary,
    source_messenger_address: String,
    message: CrossChainMessage,
    relayer_reward_address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let source = parse_chain_id(&source_blockchain_id).ok_or_else(|| {
        ContractError::InvalidChainId {
            reason: "source_blockchain_id must be 4 bytes and not 0x00000000".to_string(),
        }
    })?;
    if source == config.blockchain_id {
        return Err(ContractError::InvalidChainId {
            reason: "message cannot originate from this chain".to_string(),
        });
    }

    // Only the registered messenger of the source chain originates messages
    let trusted = TRUSTED_MESSENGERS.may_load(deps.storage, &source)?;
    if trusted.as_deref() != Some(source_messenger_address.as_str()) {
        return Err(ContractError::UntrustedSource {
            blockchain_id: chain_id_hex(&source),
            address: source_messenger_address,
        });
    }

    let destination = parse_chain_id(&message.destination_blockchain_id)
        .filter(|destination| *destination == config.blockchain_id)
        .ok_or_else(|| ContractError::InvalidDestination {
            reason: format!(
                "message is not addressed to {}",
                chain_id_hex(&config.blockchain_id)
            ),
        })?;

    let message_id = compute_message_id(
        &source_messenger_address,
        &source,
        &destination,
        message.message_nonce,
    );
    let message_id_hex = bytes32_to_hex(&message_id);

    // A message is delivered at most once; later deliveries report the
    // original receipt and change nothing, whoever relays them
    if let Some(received) = RECEIVED_MESSAGES.may_load(deps.storage, &message_id)? {
        return Ok(Response::new()
            .add_attribute("action", "receive_cross_chain_message")
            .add_attribute("message_id", message_id_hex)
            .add_attribute("already_delivered", "true")
            .set_data(to_json_binary(&ReceiveCrossChainMessageResponse {
                message_id: Binary::from(message_id.to_vec()),
                receipt: received.receipt,
                already_delivered: true,
            })?));
    }

    if !message.allowed_relayer_addresses.is_empty()
        && !message
            .allowed_relayer_addresses
            .iter()
            .any(|relayer| relayer == info.sender.as_str())
    {
        return Err(ContractError::UnauthorizedRelayer {
            relayer: info.sender.to_string(),
        });
    }

    if relayer_reward_address.is_empty() {
        return Err(ContractError::InvalidRelayerRewardAddress);
    }

    let receipt = MessageReceipt {
        message_id: Binary::from(message_id.to_vec()),
        relayer_reward_address,
    };
    RECEIVED_MESSAGES.save(
        deps.storage,
        &message_id,
        &ReceivedMessage {
            source_blockchain_id: source,
            receipt: receipt.clone(),
        },
    )?;
    receipt_queue::enqueue(deps.storage, &source, &receipt)?;

    let receipt_events = process_receipts(deps.storage, &source, &message.receipts)?;

    let event = Event::new("receive_cross_chain_message")
        .add_attribute("message_id", &message_id_hex)
        .add_attribute("source_blockchain_id", chain_id_hex(&source))
        .add_attribute("source_messenger_address", &source_messenger_address)
        .add_attribute("origin_sender_address", &message.origin_sender_address)
        .add_attribute("destination_address", &message.destination_address)
        .add_attribute("relayer", info.sender.as_str())
        .add_attribute("relayer_reward_address", &receipt.relayer_reward_address)
        .add_attribute("receipts", message.receipts.len().to_string());

    let mut response = Response::new()
        .add_event(event)
        .add_events(receipt_events)
        .add_attribute("action", "receive_cross_chain_message")
        .add_attribute("message_id", message_id_hex)
        .set_data(to_json_binary(&ReceiveCrossChainMessageResponse {
            message_id: Binary::from(message_id.to_vec()),
            receipt,
            already_delivered: false,
        })?);

    if !message.message.is_empty() {
        let execution = MessageExecution {
            source_blockchain_id: source,
            origin_sender_address: message.origin_sender_address,
            destination_address: message.destination_address,
            message: message.message,
        };
        let execute = execution_msg(&execution)?;
        let reply_id = NEXT_REPLY_ID.may_load(deps.storage)?.unwrap_or_default();
        NEXT_REPLY_ID.save(deps.storage, &(reply_id + 1))?;
        PENDING_EXECUTIONS.save(
            deps.storage,
            reply_id,
            &PendingExecution {
                message_id,
                execution,
            },
        )?;
        response = response.add_submessage(SubMsg::reply_always(execute, reply_id));
    }

    Ok(response)
}

/// Reply handler for payload execution
pub fn handle_execution_reply(
    deps: DepsMut,
    reply_id: u64,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let pending = PENDING_EXECUTIONS
        .may_load(deps.storage, reply_id)?
        .ok_or(ContractError::UnknownReplyId { id: reply_id })?;
    PENDING_EXECUTIONS.remove(deps.storage, reply_id);

    let received = RECEIVED_MESSAGES.load(deps.storage, &pending.message_id)?;
    let message_id_hex = bytes32_to_hex(&pending.message_id);
    let data = to_json_binary(&ReceiveCrossChainMessageResponse {
        message_id: Binary::from(pending.message_id.to_vec()),
        receipt: received.receipt,
        already_delivered: false,
    })?;

    match result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("action", "execute_message")
            .add_attribute("message_id", message_id_hex)
            .add_attribute("result", "success")
            .set_data(data)),
        SubMsgResult::Err(error) => {
            FAILED_EXECUTIONS.save(deps.storage, &pending.message_id, &pending.execution)?;
            Ok(Response::new()
                .add_event(
                    Event::new("message_execution_failed")
                        .add_attribute("message_id", &message_id_hex)
                        .add_attribute(
                            "destination_address",
                            &pending.execution.destination_address,
                        )
                        .add_attribute("error", error),
                )
                .add_attribute("action", "execute_message")
                .add_attribute("message_id", message_id_hex)
                .add_attribute("result", "failed")
                .set_data(data))
        }
    }
}

/// Execute handler for re-running a payload whose execution failed.
/// A failure here reverts the whole call and keeps the failure record.
pub fn execute_retry_message_execution(
    deps: DepsMut,
    message_id: Binary,
) -> Result<Response, ContractError> {
    let id = message_id_from(&message_id)?;
    let id_hex = bytes32_to_hex(&id);

    let execution = FAILED_EXECUTIONS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::MessageExecutionNotFailed {
            message_id: id_hex.clone(),
        })?;
    FAILED_EXECUTIONS.remove(deps.storage, &id);

    Ok(Response::new()
        .add_message(execution_msg(&execution)?)
        .add_event(
            Event::new("message_execution_retried")
                .add_attribute("message_id", &id_hex)
                .add_attribute("destination_address", &execution.destination_address),
        )
        .add_attribute("action", "retry_message_execution")
        .add_attribute("message_id", id_hex))
}

fn execution_msg(execution: &MessageExecution) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: execution.destination_address.clone(),
        msg: to_json_binary(&ReceiverExecuteMsg::HandleCrossChainMessage {
            source_blockchain_id: chain_id_binary(&execution.source_blockchain_id),
            origin_sender_address: execution.origin_sender_address.clone(),
            message: execution.message.clone(),
        })?,
        funds: vec![],
    })
}
