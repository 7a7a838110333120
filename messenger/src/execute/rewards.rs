//! Receipt processing and relayer reward redemption.

use common::funds::transfer_msg;
use common::{chain_id_hex, ChainId, MessageReceipt};
use cosmwasm_std::{
    to_json_binary, DepsMut, Event, MessageInfo, Response, StdError, Storage,
};

use super::message_id_from;
use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::msg::RedeemRelayerRewardsResponse;
use crate::state::{MessageStatus, RELAYER_REWARDS, SENT_MESSAGES};

/// Apply receipts that arrived from `receipt_source`.
///
/// A receipt marks one of this chain's sent messages as delivered and
/// credits its fee to the redeemer. Receipts for unknown or already
/// delivered messages, or coming from a chain the message was not sent to,
/// are skipped.
pub fn process_receipts(
    storage: &mut dyn Storage,
    receipt_source: &ChainId,
    receipts: &[MessageReceipt],
) -> Result<Vec<Event>, ContractError> {
    let mut events = Vec::new();
    for receipt in receipts {
        let message_id = message_id_from(&receipt.message_id)?;
        let Some(mut sent) = SENT_MESSAGES.may_load(storage, &message_id)? else {
            continue;
        };
        if sent.status == MessageStatus::Delivered
            || sent.message.destination_blockchain_id.as_slice() != receipt_source.as_slice()
        {
            continue;
        }

        sent.status = MessageStatus::Delivered;
        SENT_MESSAGES.save(storage, &message_id, &sent)?;

        let fee = &sent.fee_info;
        if !fee.amount.is_zero() {
            let key = (
                receipt.relayer_reward_address.as_str(),
                fee.fee_token_address.as_str(),
            );
            let balance = RELAYER_REWARDS
                .may_load(storage, key)?
                .unwrap_or_default()
                .checked_add(fee.amount)
                .map_err(StdError::from)?;
            RELAYER_REWARDS.save(storage, key, &balance)?;
        }

        events.push(
            Event::new("receipt_received")
                .add_attribute("message_id", bytes32_to_hex(&message_id))
                .add_attribute("destination_blockchain_id", chain_id_hex(receipt_source))
                .add_attribute("relayer_reward_address", &receipt.relayer_reward_address)
                .add_attribute("fee_token_address", &fee.fee_token_address)
                .add_attribute("fee_amount", fee.amount.to_string()),
        );
    }
    Ok(events)
}

/// Execute handler for redeeming the caller's relayer rewards
pub fn execute_redeem_relayer_rewards(
    deps: DepsMut,
    info: MessageInfo,
    fee_token_address: String,
) -> Result<Response, ContractError> {
    let fee_token = deps.api.addr_validate(&fee_token_address)?;
    let key = (info.sender.as_str(), fee_token.as_str());
    let amount = RELAYER_REWARDS
        .may_load(deps.storage, key)?
        .unwrap_or_default();

    let mut response = Response::new()
        .add_attribute("action", "redeem_relayer_rewards")
        .add_attribute("relayer", info.sender.as_str())
        .add_attribute("fee_token_address", fee_token.as_str())
        .add_attribute("amount", amount.to_string())
        .set_data(to_json_binary(&RedeemRelayerRewardsResponse { amount })?);

    if !amount.is_zero() {
        RELAYER_REWARDS.remove(deps.storage, key);
        response = response
            .add_message(transfer_msg(&fee_token, info.sender.as_str(), amount)?)
            .add_event(
                Event::new("relayer_rewards_redeemed")
                    .add_attribute("relayer", info.sender.as_str())
                    .add_attribute("fee_token_address", fee_token.as_str())
                    .add_attribute("amount", amount.to_string()),
            );
    }

    Ok(response)
}
