//! Outgoing messages to the home.

use common::funds::{burn_from_msg, ensure_pullable, increase_allowance_msg, transfer_from_msg};
use common::{
    chain_id_binary, chain_id_hex, parse_chain_id, FeeInfo, SendTokensInput,
    SendTokensResponse, TransferrerMessage,
};
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    Storage, Uint128,
};
use messenger::msg::SendCrossChainMessageInput;

use crate::error::ContractError;
use crate::state::{
    Config, CONFIG, IS_COLLATERALIZED, MULTI_HOP_REQUIRED_GAS, REGISTER_REMOTE_REQUIRED_GAS,
    STATS,
};

/// A message to the home and what the sender pays for it
struct HomeBound {
    /// Tokens to burn from the sender, in remote units
    burn: Uint128,
    fee_token_address: String,
    fee_amount: Uint128,
    required_gas_limit: u64,
    payload: TransferrerMessage,
}

/// Execute handler for asking the home to register this remote
pub fn execute_register_with_home(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    fee_info: FeeInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let messages = send_to_home(
        deps.as_ref(),
        &env,
        &config,
        &info.sender,
        HomeBound {
            burn: Uint128::zero(),
            fee_token_address: fee_info.fee_token_address,
            fee_amount: fee_info.amount,
            required_gas_limit: REGISTER_REMOTE_REQUIRED_GAS,
            payload: TransferrerMessage::RegisterRemote {
                initial_reserve_imbalance: config.initial_reserve_imbalance,
                remote_decimals: config.token_decimals,
            },
        },
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "register_with_home")
        .add_attribute(
            "home_blockchain_id",
            chain_id_hex(&config.home_blockchain_id),
        )
        .add_attribute("home_transferrer_address", &config.home_transferrer_address)
        .add_attribute(
            "initial_reserve_imbalance",
            config.initial_reserve_imbalance.to_string(),
        ))
}

/// Execute handler for burning tokens and releasing them on the home chain
#[allow(clippy::too_many_arguments)]
pub fn execute_send_to_home(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    primary_fee_token_address: String,
    primary_fee: Uint128,
    required_gas_limit: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    if recipient.is_empty() {
        return Err(ContractError::InvalidRecipient);
    }

    let config = CONFIG.load(deps.storage)?;
    ensure_collateralized(deps.storage)?;

    let home_amount = config.scale.to_home(amount)?;
    if home_amount.is_zero() {
        return Err(ContractError::AmountTooSmall {
            reason: format!("{amount} is worth nothing in home units"),
        });
    }

    let messages = send_to_home(
        deps.as_ref(),
        &env,
        &config,
        &info.sender,
        HomeBound {
            burn: amount,
            fee_token_address: primary_fee_token_address,
            fee_amount: primary_fee,
            required_gas_limit,
            payload: TransferrerMessage::SingleHopSend {
                recipient: recipient.clone(),
                amount,
            },
        },
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_sent_to_home += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_event(
            Event::new("tokens_sent")
                .add_attribute("sender", info.sender.as_str())
                .add_attribute(
                    "destination_blockchain_id",
                    chain_id_hex(&config.home_blockchain_id),
                )
                .add_attribute("recipient", recipient)
                .add_attribute("amount", amount.to_string())
                .add_attribute("home_amount", home_amount.to_string()),
        )
        .add_attribute("action", "send_to_home")
        .add_attribute("amount", amount.to_string())
        .set_data(to_json_binary(&SendTokensResponse {
            amount: home_amount,
        })?))
}

/// Execute handler for sending to another remote through the home
pub fn execute_send_and_forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    input: SendTokensInput,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    if input.recipient.is_empty() {
        return Err(ContractError::InvalidRecipient);
    }
    if input.required_gas_limit == 0 {
        return Err(ContractError::InvalidRequiredGas);
    }

    let config = CONFIG.load(deps.storage)?;
    ensure_collateralized(deps.storage)?;

    let destination = parse_chain_id(&input.destination_blockchain_id).ok_or_else(|| {
        ContractError::InvalidDestination {
            reason: "destination_blockchain_id must be 4 bytes and not 0x00000000".to_string(),
        }
    })?;
    if destination == config.home_blockchain_id {
        return Err(ContractError::InvalidDestination {
            reason: "use SendToHome to send to the home chain".to_string(),
        });
    }
    if input.destination_transferrer_address.is_empty() {
        return Err(ContractError::InvalidDestination {
            reason: "destination_transferrer_address must not be empty".to_string(),
        });
    }

    let home_amount = config.scale.to_home(amount)?;
    if home_amount <= input.secondary_fee {
        return Err(ContractError::AmountTooSmall {
            reason: format!(
                "{home_amount} in home units does not cover the secondary fee {}",
                input.secondary_fee
            ),
        });
    }

    let messages = send_to_home(
        deps.as_ref(),
        &env,
        &config,
        &info.sender,
        HomeBound {
            burn: amount,
            fee_token_address: input.primary_fee_token_address,
            fee_amount: input.primary_fee,
            required_gas_limit: MULTI_HOP_REQUIRED_GAS,
            payload: TransferrerMessage::MultiHopSend {
                destination_blockchain_id: input.destination_blockchain_id,
                destination_transferrer_address: input.destination_transferrer_address.clone(),
                recipient: input.recipient.clone(),
                amount,
                secondary_fee: input.secondary_fee,
                secondary_gas_limit: input.required_gas_limit,
            },
        },
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_forwarded += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_event(
            Event::new("tokens_sent")
                .add_attribute("sender", info.sender.as_str())
                .add_attribute("destination_blockchain_id", chain_id_hex(&destination))
                .add_attribute(
                    "destination_transferrer_address",
                    input.destination_transferrer_address,
                )
                .add_attribute("recipient", input.recipient)
                .add_attribute("amount", amount.to_string())
                .add_attribute("home_amount", home_amount.to_string())
                .add_attribute("secondary_fee", input.secondary_fee.to_string()),
        )
        .add_attribute("action", "send_and_forward")
        .add_attribute("amount", amount.to_string())
        .set_data(to_json_binary(&SendTokensResponse {
            amount: home_amount,
        })?))
}

fn ensure_collateralized(storage: &dyn Storage) -> Result<(), ContractError> {
    if !IS_COLLATERALIZED.load(storage)? {
        return Err(ContractError::NotCollateralized);
    }
    Ok(())
}

/// Burn from the sender, collect the relayer fee and message the home.
fn send_to_home(
    deps: Deps,
    env: &Env,
    config: &Config,
    sender: &Addr,
    outbound: HomeBound,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let fee_token = if outbound.fee_amount.is_zero() {
        None
    } else {
        Some(deps.api.addr_validate(&outbound.fee_token_address)?)
    };

    let mut pulls = vec![(config.token.clone(), outbound.burn)];
    if let Some(fee_token) = &fee_token {
        pulls.push((fee_token.clone(), outbound.fee_amount));
    }
    ensure_pullable(&deps.querier, sender.as_str(), &env.contract.address, &pulls)?;

    let mut messages = Vec::with_capacity(4);
    if !outbound.burn.is_zero() {
        messages.push(burn_from_msg(&config.token, sender.as_str(), outbound.burn)?);
    }

    let fee_info = match fee_token {
        Some(fee_token) => {
            messages.push(transfer_from_msg(
                &fee_token,
                sender.as_str(),
                &env.contract.address,
                outbound.fee_amount,
            )?);
            messages.push(increase_allowance_msg(
                &fee_token,
                &config.messenger,
                outbound.fee_amount,
            )?);
            FeeInfo::new(fee_token, outbound.fee_amount)
        }
        None => FeeInfo::none(),
    };

    messages.push(
        SendCrossChainMessageInput {
            destination_blockchain_id: chain_id_binary(&config.home_blockchain_id),
            destination_address: config.home_transferrer_address.clone(),
            fee_info,
            required_gas_limit: outbound.required_gas_limit,
            allowed_relayer_addresses: vec![],
            message: outbound.payload.encode()?,
        }
        .into_cosmos_msg(&config.messenger)?,
    );
    Ok(messages)
}
