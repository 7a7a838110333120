//! Admin configuration handlers.

use common::{chain_id_hex, parse_chain_id};
use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, TRUSTED_MESSENGERS};

/// Execute handler for registering (or rotating) the messenger trusted as
/// the sender of messages from `blockchain_id`
pub fn execute_set_trusted_messenger(
    deps: DepsMut,
    info: MessageInfo,
    blockchain_id: Binary,
    messenger_address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let chain = parse_chain_id(&blockchain_id).ok_or_else(|| ContractError::InvalidChainId {
        reason: "blockchain_id must be 4 bytes and not 0x00000000".to_string(),
    })?;
    if chain == config.blockchain_id {
        return Err(ContractError::InvalidChainId {
            reason: "cannot trust a messenger on this chain".to_string(),
        });
    }
    // Remote addresses use the source chain's encoding; only emptiness is checked
    if messenger_address.is_empty() {
        return Err(ContractError::InvalidMessengerAddress);
    }

    let previous = TRUSTED_MESSENGERS.may_load(deps.storage, &chain)?;
    TRUSTED_MESSENGERS.save(deps.storage, &chain, &messenger_address)?;

    Ok(Response::new()
        .add_attribute("action", "set_trusted_messenger")
        .add_attribute("blockchain_id", chain_id_hex(&chain))
        .add_attribute("messenger_address", messenger_address)
        .add_attribute("previous", previous.unwrap_or_default()))
}
