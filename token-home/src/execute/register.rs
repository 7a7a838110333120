//! Remote registration.
//!
//! A remote is registered exactly once, either by the admin with explicit
//! parameters or by the remote itself through a `RegisterRemote` payload.

use common::{chain_id_hex, parse_chain_id, ChainId, TokenScale};
use cosmwasm_std::{Binary, DepsMut, Event, MessageInfo, Response, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{Config, RemoteSettings, CONFIG, REMOTES};

/// Execute handler for registering a destination (admin only)
pub fn execute_register_destination(
    deps: DepsMut,
    info: MessageInfo,
    remote_blockchain_id: Binary,
    remote_transferrer_address: String,
    required_collateral: Uint128,
    token_multiplier: Uint128,
    multiply_on_remote: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let chain =
        parse_chain_id(&remote_blockchain_id).ok_or_else(|| ContractError::InvalidChainId {
            reason: "remote_blockchain_id must be 4 bytes and not 0x00000000".to_string(),
        })?;
    let scale = TokenScale::new(token_multiplier, multiply_on_remote)
        .ok_or(ContractError::InvalidMultiplier)?;

    register(
        deps.storage,
        &chain,
        remote_transferrer_address,
        required_collateral,
        scale,
        "admin",
    )
}

/// Register the remote that sent a `RegisterRemote` payload.
///
/// The remote starts with `initial_reserve_imbalance` tokens that the home
/// has not locked yet, so that much (rounded up to home units) has to be
/// provided as collateral before anything is sent to it.
pub(crate) fn register_remote(
    deps: DepsMut,
    config: &Config,
    source: &ChainId,
    origin_sender_address: String,
    initial_reserve_imbalance: Uint128,
    remote_decimals: u8,
) -> Result<Response, ContractError> {
    let scale = TokenScale::from_decimals(config.token_decimals, remote_decimals).ok_or(
        ContractError::InvalidDecimals {
            home_decimals: config.token_decimals,
            remote_decimals,
        },
    )?;
    let required_collateral = scale.to_home_round_up(initial_reserve_imbalance)?;

    register(
        deps.storage,
        source,
        origin_sender_address,
        required_collateral,
        scale,
        "remote",
    )
}

fn register(
    storage: &mut dyn Storage,
    chain: &ChainId,
    address: String,
    required_collateral: Uint128,
    scale: TokenScale,
    registered_by: &str,
) -> Result<Response, ContractError> {
    if address.is_empty() {
        return Err(ContractError::InvalidRemoteAddress);
    }

    let key = (chain.as_slice(), address.as_str());
    if REMOTES.has(storage, key) {
        return Err(ContractError::AlreadyRegistered {
            blockchain_id: chain_id_hex(chain),
            address: address.clone(),
        });
    }

    let settings = RemoteSettings {
        required_collateral,
        collateral_needed: required_collateral,
        scale,
        transferred_balance: Uint128::zero(),
    };
    REMOTES.save(storage, key, &settings)?;

    let mut response = Response::new()
        .add_event(
            Event::new("remote_registered")
                .add_attribute("remote_blockchain_id", chain_id_hex(chain))
                .add_attribute("remote_transferrer_address", &address)
                .add_attribute("required_collateral", required_collateral.to_string())
                .add_attribute("token_multiplier", scale.multiplier.to_string())
                .add_attribute("multiply_on_remote", scale.multiply_on_remote.to_string())
                .add_attribute("registered_by", registered_by),
        )
        .add_attribute("action", "register_destination")
        .add_attribute("remote_blockchain_id", chain_id_hex(chain))
        .add_attribute("remote_transferrer_address", &address);

    if settings.is_secured() {
        response = response.add_event(secured_event(chain, &address));
    }
    Ok(response)
}

pub(crate) fn secured_event(chain: &ChainId, address: &str) -> Event {
    Event::new("remote_secured")
        .add_attribute("remote_blockchain_id", chain_id_hex(chain))
        .add_attribute("remote_transferrer_address", address)
}
