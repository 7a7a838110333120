//! Multi-hop routing between remotes.
//!
//! A forward never pays out on the home chain: the tokens unlocked from the
//! source remote are re-locked for the destination remote, minus the
//! secondary fee which pays the relayer of the second hop. Any failure
//! reverts the whole forward, leaving the source remote's balance untouched
//! until the messenger retries the execution.

use common::{chain_id_hex, ChainId};
use cosmwasm_std::{Binary, DepsMut, Event, Response, Uint128};

use super::receive::unlock_from_remote;
use super::send::{lock_for_remote, OutboundTransfer};
use crate::error::ContractError;
use crate::state::{Config, STATS};

pub(crate) struct Forward {
    pub destination_blockchain_id: Binary,
    pub destination_transferrer_address: String,
    pub recipient: String,
    /// Source remote units
    pub amount: Uint128,
    /// Home units
    pub secondary_fee: Uint128,
    pub secondary_gas_limit: u64,
}

pub(crate) fn route_multi_hop(
    deps: DepsMut,
    config: &Config,
    source: &ChainId,
    origin_sender_address: &str,
    forward: Forward,
) -> Result<Response, ContractError> {
    let home_amount = unlock_from_remote(deps.storage, source, origin_sender_address, forward.amount)?;
    if home_amount <= forward.secondary_fee {
        return Err(ContractError::AmountTooSmall {
            reason: format!(
                "{home_amount} does not cover the secondary fee {}",
                forward.secondary_fee
            ),
        });
    }
    let forward_amount = home_amount - forward.secondary_fee;

    let fee_token = if forward.secondary_fee.is_zero() {
        None
    } else {
        Some(config.token.clone())
    };

    let event = Event::new("tokens_routed")
        .add_attribute("source_blockchain_id", chain_id_hex(source))
        .add_attribute("source_transferrer_address", origin_sender_address)
        .add_attribute(
            "destination_blockchain_id",
            chain_id_hex(&forward.destination_blockchain_id),
        )
        .add_attribute(
            "destination_transferrer_address",
            &forward.destination_transferrer_address,
        )
        .add_attribute("recipient", &forward.recipient)
        .add_attribute("amount", home_amount.to_string())
        .add_attribute("secondary_fee", forward.secondary_fee.to_string());

    let locked = lock_for_remote(
        deps.storage,
        config,
        OutboundTransfer {
            destination_blockchain_id: forward.destination_blockchain_id,
            destination_transferrer_address: forward.destination_transferrer_address,
            recipient: forward.recipient,
            amount: forward_amount,
            fee_token,
            fee_amount: forward.secondary_fee,
            required_gas_limit: forward.secondary_gas_limit,
        },
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_routed += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(locked.messages)
        .add_event(
            event
                .add_attribute("forwarded_amount", forward_amount.to_string())
                .add_attribute("scaled_amount", locked.scaled_amount.to_string()),
        )
        .add_attribute("action", "route_multi_hop")
        .add_attribute("amount", forward_amount.to_string()))
}
