//! Incoming messages from the home.

use common::funds::mint_msg;
use common::{chain_id_hex, TransferrerMessage};
use cosmwasm_std::{Binary, DepsMut, Event, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, IS_COLLATERALIZED, STATS};

/// Execute handler for payloads delivered by the messenger. Only the
/// registered home may mint.
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

    if source_blockchain_id.as_slice() != config.home_blockchain_id.as_slice()
        || origin_sender_address != config.home_transferrer_address
    {
        return Err(ContractError::UntrustedSource {
            blockchain_id: chain_id_hex(&source_blockchain_id),
            address: origin_sender_address,
        });
    }

    let (recipient, amount) = match TransferrerMessage::decode(&message)? {
        TransferrerMessage::SingleHopSend { recipient, amount } => (recipient, amount),
        _ => {
            return Err(ContractError::InvalidMessage {
                reason: "the home only sends single-hop transfers".to_string(),
            })
        }
    };
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    IS_COLLATERALIZED.save(deps.storage, &true)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_received += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_message(mint_msg(&config.token, recipient.as_str(), amount)?)
        .add_event(
            Event::new("tokens_minted")
                .add_attribute("recipient", recipient.as_str())
                .add_attribute("amount", amount.to_string()),
        )
        .add_attribute("action", "receive")
        .add_attribute("amount", amount.to_string()))
}
