//! Incoming messages from remotes.

use common::funds::transfer_msg;
use common::{chain_id_hex, parse_chain_id, ChainId, TransferrerMessage};
use cosmwasm_std::{Binary, DepsMut, Event, MessageInfo, Response, Storage, Uint128};

use super::register::register_remote;
use super::router::{route_multi_hop, Forward};
use super::untrusted_source;
use crate::error::ContractError;
use crate::state::{Config, CONFIG, REMOTES, STATS};

/// Execute handler for payloads delivered by the messenger
pub fn execute_handle_cross_chain_message(
    deps: DepsMut,
    info: MessageInfo,
    source_blockchain_id: Binary,
    origin_sender_address: String,
    message: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.messenger {
        return Err(ContractError::Unauthorized);
    }

    let source = parse_chain_id(&source_blockchain_id)
        .ok_or_else(|| untrusted_source(&source_blockchain_id, &origin_sender_address))?;

    match TransferrerMessage::decode(&message)? {
        TransferrerMessage::RegisterRemote {
            initial_reserve_imbalance,
            remote_decimals,
        } => register_remote(
            deps,
            &config,
            &source,
            origin_sender_address,
            initial_reserve_imbalance,
            remote_decimals,
        ),
        TransferrerMessage::SingleHopSend { recipient, amount } => {
            withdraw(deps, &config, &source, &origin_sender_address, recipient, amount)
        }
        TransferrerMessage::MultiHopSend {
            destination_blockchain_id,
            destination_transferrer_address,
            recipient,
            amount,
            secondary_fee,
            secondary_gas_limit,
        } => route_multi_hop(
            deps,
            &config,
            &source,
            &origin_sender_address,
            Forward {
                destination_blockchain_id,
                destination_transferrer_address,
                recipient,
                amount,
                secondary_fee,
                secondary_gas_limit,
            },
        ),
    }
}

/// Release tokens a remote burned, debiting its transferred balance.
/// `remote_amount` is in the remote's units; returns home units.
pub(crate) fn unlock_from_remote(
    storage: &mut dyn Storage,
    source: &ChainId,
    origin_sender_address: &str,
    remote_amount: Uint128,
) -> Result<Uint128, ContractError> {
    let key = (source.as_slice(), origin_sender_address);
    let mut settings = REMOTES
        .may_load(storage, key)?
        .ok_or_else(|| untrusted_source(source, origin_sender_address))?;

    let home_amount = settings.scale.to_home(remote_amount)?;
    if home_amount.is_zero() {
        return Err(ContractError::AmountTooSmall {
            reason: format!("{remote_amount} is worth nothing in home units"),
        });
    }

    let available = settings.transferred_balance;
    settings.transferred_balance = available.checked_sub(home_amount).map_err(|_| {
        ContractError::TransferredBalanceExceeded {
            requested: home_amount,
            available,
        }
    })?;
    REMOTES.save(storage, key, &settings)?;

    Ok(home_amount)
}

fn withdraw(
    deps: DepsMut,
    config: &Config,
    source: &ChainId,
    origin_sender_address: &str,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let home_amount = unlock_from_remote(deps.storage, source, origin_sender_address, amount)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_withdrawn += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_message(transfer_msg(&config.token, recipient.as_str(), home_amount)?)
        .add_event(
            Event::new("tokens_withdrawn")
                .add_attribute("source_blockchain_id", chain_id_hex(source))
                .add_attribute("source_transferrer_address", origin_sender_address)
                .add_attribute("recipient", recipient.as_str())
                .add_attribute("amount", home_amount.to_string()),
        )
        .add_attribute("action", "withdraw")
        .add_attribute("amount", home_amount.to_string()))
}
