//! Collateral provisioning.

use common::funds::{ensure_pullable, transfer_from_msg};
use common::{chain_id_hex, parse_chain_id};
use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Response, StdError, Uint128,
};

use super::register::secured_event;
use super::unknown_destination;
use crate::error::ContractError;
use crate::msg::AddCollateralResponse;
use crate::state::{CONFIG, REMOTES};

/// Execute handler for adding collateral to a registered remote.
///
/// Only `min(amount, collateral_needed)` is pulled from the caller; the
/// remote becomes secured when the stored requirement is fully met.
pub fn execute_add_collateral(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    remote_blockchain_id: Binary,
    remote_transferrer_address: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "collateral amount must be greater than zero".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let chain = parse_chain_id(&remote_blockchain_id)
        .ok_or_else(|| unknown_destination(&remote_blockchain_id, &remote_transferrer_address))?;
    let key = (chain.as_slice(), remote_transferrer_address.as_str());
    let mut settings = REMOTES
        .may_load(deps.storage, key)?
        .ok_or_else(|| unknown_destination(&chain, &remote_transferrer_address))?;

    if settings.is_secured() {
        return Err(ContractError::AlreadySecured);
    }

    let contributed = amount.min(settings.collateral_needed);
    ensure_pullable(
        &deps.querier,
        info.sender.as_str(),
        &env.contract.address,
        &[(config.token.clone(), contributed)],
    )?;

    settings.collateral_needed -= contributed;
    settings.transferred_balance = settings
        .transferred_balance
        .checked_add(contributed)
        .map_err(StdError::from)?;
    REMOTES.save(deps.storage, key, &settings)?;

    let pull = transfer_from_msg(
        &config.token,
        info.sender.as_str(),
        &env.contract.address,
        contributed,
    )?;

    let mut response = Response::new()
        .add_message(pull)
        .add_event(
            Event::new("collateral_added")
                .add_attribute("remote_blockchain_id", chain_id_hex(&chain))
                .add_attribute("remote_transferrer_address", &remote_transferrer_address)
                .add_attribute("sender", info.sender.as_str())
                .add_attribute("amount", contributed.to_string())
                .add_attribute("collateral_needed", settings.collateral_needed.to_string()),
        )
        .add_attribute("action", "add_collateral")
        .add_attribute("amount", contributed.to_string())
        .set_data(to_json_binary(&AddCollateralResponse {
            contributed,
            collateral_needed: settings.collateral_needed,
        })?);

    if settings.is_secured() {
        response = response.add_event(secured_event(&chain, &remote_transferrer_address));
    }
    Ok(response)
}
