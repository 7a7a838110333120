//! Outgoing message handlers.

use common::funds::{ensure_pullable, transfer_from_msg};
use common::{
    chain_id_binary, chain_id_hex, parse_chain_id, ChainId, CrossChainMessage, FeeInfo,
    MessageReceipt,
};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, DepsMut, Env, Event, MessageInfo, Response, StdError, Storage,
    Uint128,
};

use super::message_id_from;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_message_id};
use crate::msg::{SendCrossChainMessageInput, SendCrossChainMessageResponse};
use crate::receipt_queue;
use crate::state::{
    MessageStatus, SentMessageInfo, CONFIG, MAX_RECEIPTS_PER_MESSAGE, MESSAGE_NONCE,
    RECEIVED_MESSAGES, SENT_MESSAGES,
};

struct OutgoingMessage {
    destination: ChainId,
    destination_address: String,
    fee_info: FeeInfo,
    required_gas_limit: u64,
    allowed_relayer_addresses: Vec<String>,
    receipts: Vec<MessageReceipt>,
    message: Binary,
}

/// Execute handler for sending a message to another chain
pub fn execute_send_cross_chain_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    input: SendCrossChainMessageInput,
) -> Result<Response, ContractError> {
    if input.required_gas_limit == 0 {
        return Err(ContractError::InvalidRequiredGas);
    }
    if input.destination_address.is_empty() && !input.message.is_empty() {
        return Err(ContractError::InvalidDestination {
            reason: "destination_address is required to deliver a payload".to_string(),
        });
    }

    let destination = parse_destination(deps.storage, &input.destination_blockchain_id)?;

    // Piggy-back receipts owed to the destination chain
    let receipts = receipt_queue::dequeue(deps.storage, &destination, MAX_RECEIPTS_PER_MESSAGE)?;

    send_message(
        deps,
        &env,
        &info.sender,
        OutgoingMessage {
            destination,
            destination_address: input.destination_address,
            fee_info: input.fee_info,
            required_gas_limit: input.required_gas_limit,
            allowed_relayer_addresses: input.allowed_relayer_addresses,
            receipts,
            message: input.message,
        },
    )
}

/// Execute handler for adding to the fee of an undelivered message
pub fn execute_add_fee_amount(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message_id: Binary,
    fee_token_address: String,
    additional_fee_amount: Uint128,
) -> Result<Response, ContractError> {
    let id = message_id_from(&message_id)?;
    let id_hex = bytes32_to_hex(&id);

    if additional_fee_amount.is_zero() {
        return Err(ContractError::InvalidFeeAmount {
            reason: "additional fee amount must be greater than zero".to_string(),
        });
    }

    let mut sent = SENT_MESSAGES
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::UnknownMessage {
            message_id: id_hex.clone(),
        })?;

    // Once the receipt is in, the reward has been credited and the fee is final
    if sent.status == MessageStatus::Delivered {
        return Err(ContractError::MessageAlreadyDelivered { message_id: id_hex });
    }

    if sent.fee_info.fee_token_address != fee_token_address {
        return Err(ContractError::FeeTokenMismatch {
            expected: sent.fee_info.fee_token_address,
            got: fee_token_address,
        });
    }

    let fee_token = deps.api.addr_validate(&fee_token_address)?;
    ensure_pullable(
        &deps.querier,
        info.sender.as_str(),
        &env.contract.address,
        &[(fee_token.clone(), additional_fee_amount)],
    )?;

    sent.fee_info.amount = sent
        .fee_info
        .amount
        .checked_add(additional_fee_amount)
        .map_err(StdError::from)?;
    SENT_MESSAGES.save(deps.storage, &id, &sent)?;

    let pull = transfer_from_msg(
        &fee_token,
        info.sender.as_str(),
        &env.contract.address,
        additional_fee_amount,
    )?;

    Ok(Response::new()
        .add_message(pull)
        .add_event(
            Event::new("add_fee_amount")
                .add_attribute("message_id", &id_hex)
                .add_attribute("fee_token_address", fee_token.as_str())
                .add_attribute("additional_fee_amount", additional_fee_amount.to_string())
                .add_attribute("updated_fee_amount", sent.fee_info.amount.to_string()),
        )
        .add_attribute("action", "add_fee_amount")
        .add_attribute("message_id", id_hex))
}

/// Execute handler for sending receipts of specific delivered messages back
/// to their source chain
pub fn execute_send_specified_receipts(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    source_blockchain_id: Binary,
    message_ids: Vec<Binary>,
    fee_info: FeeInfo,
    allowed_relayer_addresses: Vec<String>,
) -> Result<Response, ContractError> {
    let origin = parse_destination(deps.storage, &source_blockchain_id)?;

    let mut receipts = Vec::with_capacity(message_ids.len());
    for raw in &message_ids {
        let id = message_id_from(raw)?;
        let received = RECEIVED_MESSAGES
            .may_load(deps.storage, &id)?
            .filter(|received| received.source_blockchain_id == origin)
            .ok_or_else(|| ContractError::UnknownMessage {
                message_id: bytes32_to_hex(&id),
            })?;
        receipts.push(received.receipt);
    }

    send_message(
        deps,
        &env,
        &info.sender,
        OutgoingMessage {
            destination: origin,
            destination_address: String::new(),
            fee_info,
            required_gas_limit: 0,
            allowed_relayer_addresses,
            receipts,
            message: Binary::default(),
        },
    )
}

fn parse_destination(storage: &dyn Storage, raw: &Binary) -> Result<ChainId, ContractError> {
    let destination = parse_chain_id(raw).ok_or_else(|| ContractError::InvalidDestination {
        reason: "blockchain ID must be 4 bytes and not 0x00000000".to_string(),
    })?;

    let config = CONFIG.load(storage)?;
    if destination == config.blockchain_id {
        return Err(ContractError::InvalidDestination {
            reason: "cannot send a message to this chain".to_string(),
        });
    }
    Ok(destination)
}

fn send_message(
    deps: DepsMut,
    env: &Env,
    sender: &Addr,
    outgoing: OutgoingMessage,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut response = Response::new();

    // Escrow the relayer fee
    let fee_token = if outgoing.fee_info.fee_token_address.is_empty() {
        None
    } else {
        Some(deps.api.addr_validate(&outgoing.fee_info.fee_token_address)?)
    };
    let fee_info = match fee_token {
        Some(fee_token) => {
            let amount = outgoing.fee_info.amount;
            if !amount.is_zero() {
                ensure_pullable(
                    &deps.querier,
                    sender.as_str(),
                    &env.contract.address,
                    &[(fee_token.clone(), amount)],
                )?;
                response = response.add_message(transfer_from_msg(
                    &fee_token,
                    sender.as_str(),
                    &env.contract.address,
                    amount,
                )?);
            }
            FeeInfo::new(fee_token, amount)
        }
        None if outgoing.fee_info.amount.is_zero() => FeeInfo::none(),
        None => {
            return Err(ContractError::InvalidFeeAmount {
                reason: "a fee token is required for a non-zero fee".to_string(),
            })
        }
    };

    let nonce = MESSAGE_NONCE.load(deps.storage)?;
    MESSAGE_NONCE.save(deps.storage, &(nonce + 1))?;

    let message_id = compute_message_id(
        env.contract.address.as_str(),
        &config.blockchain_id,
        &outgoing.destination,
        nonce,
    );
    let message_id_hex = bytes32_to_hex(&message_id);

    let event = Event::new("send_cross_chain_message")
        .add_attribute("message_id", &message_id_hex)
        .add_attribute("message_nonce", nonce.to_string())
        .add_attribute(
            "destination_blockchain_id",
            chain_id_hex(&outgoing.destination),
        )
        .add_attribute("destination_address", &outgoing.destination_address)
        .add_attribute("sender", sender.as_str())
        .add_attribute("fee_token_address", &fee_info.fee_token_address)
        .add_attribute("fee_amount", fee_info.amount.to_string())
        .add_attribute("receipts", outgoing.receipts.len().to_string());

    let message = CrossChainMessage {
        message_nonce: nonce,
        origin_sender_address: sender.to_string(),
        destination_blockchain_id: chain_id_binary(&outgoing.destination),
        destination_address: outgoing.destination_address,
        required_gas_limit: outgoing.required_gas_limit,
        allowed_relayer_addresses: outgoing.allowed_relayer_addresses,
        receipts: outgoing.receipts,
        message: outgoing.message,
    };
    SENT_MESSAGES.save(
        deps.storage,
        &message_id,
        &SentMessageInfo {
            message,
            sender: sender.clone(),
            fee_info,
            status: MessageStatus::Sent,
        },
    )?;

    Ok(response
        .add_event(event)
        .add_attribute("action", "send_cross_chain_message")
        .add_attribute("message_id", message_id_hex)
        .set_data(to_json_binary(&SendCrossChainMessageResponse {
            message_id: Binary::from(message_id.to_vec()),
        })?))
}
