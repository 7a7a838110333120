//! Sends from the home to a remote.

use common::funds::{ensure_pullable, increase_allowance_msg, transfer_from_msg};
use common::{
    chain_id_hex, parse_chain_id, FeeInfo, SendTokensInput, SendTokensResponse,
    TransferrerMessage,
};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response,
    StdError, StdResult, Storage, Uint128,
};
use messenger::msg::SendCrossChainMessageInput;

use super::unknown_destination;
use crate::error::ContractError;
use crate::state::{Config, CONFIG, REMOTES, STATS};

/// Tokens leaving the home toward a remote
pub(crate) struct OutboundTransfer {
    pub destination_blockchain_id: Binary,
    pub destination_transferrer_address: String,
    pub recipient: String,
    /// Home units
    pub amount: Uint128,
    pub fee_token: Option<Addr>,
    pub fee_amount: Uint128,
    pub required_gas_limit: u64,
}

pub(crate) struct LockedTransfer {
    /// Amount the recipient receives, in remote units
    pub scaled_amount: Uint128,
    pub messages: Vec<CosmosMsg>,
}

/// Execute handler for sending home tokens to a remote
pub fn execute_send(
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
    if !input.secondary_fee.is_zero() {
        return Err(ContractError::NonZeroSecondaryFee);
    }
    if input.recipient.is_empty() {
        return Err(ContractError::InvalidRecipient);
    }

    let config = CONFIG.load(deps.storage)?;

    let fee_token = if input.primary_fee.is_zero() {
        None
    } else {
        Some(deps.api.addr_validate(&input.primary_fee_token_address)?)
    };

    let mut pulls = vec![(config.token.clone(), amount)];
    if let Some(fee_token) = &fee_token {
        pulls.push((fee_token.clone(), input.primary_fee));
    }
    ensure_pullable(
        &deps.querier,
        info.sender.as_str(),
        &env.contract.address,
        &pulls,
    )?;
    let mut messages = pulls
        .iter()
        .map(|(token, pull)| {
            transfer_from_msg(token, info.sender.as_str(), &env.contract.address, *pull)
        })
        .collect::<StdResult<Vec<_>>>()?;

    let locked = lock_for_remote(
        deps.storage,
        &config,
        OutboundTransfer {
            destination_blockchain_id: input.destination_blockchain_id.clone(),
            destination_transferrer_address: input.destination_transferrer_address.clone(),
            recipient: input.recipient.clone(),
            amount,
            fee_token,
            fee_amount: input.primary_fee,
            required_gas_limit: input.required_gas_limit,
        },
    )?;
    messages.extend(locked.messages);

    let mut stats = STATS.load(deps.storage)?;
    stats.total_sent += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_event(
            Event::new("tokens_sent")
                .add_attribute("sender", info.sender.as_str())
                .add_attribute(
                    "destination_blockchain_id",
                    chain_id_hex(&input.destination_blockchain_id),
                )
                .add_attribute(
                    "destination_transferrer_address",
                    &input.destination_transferrer_address,
                )
                .add_attribute("recipient", &input.recipient)
                .add_attribute("amount", amount.to_string())
                .add_attribute("scaled_amount", locked.scaled_amount.to_string()),
        )
        .add_attribute("action", "send")
        .add_attribute("amount", amount.to_string())
        .set_data(to_json_binary(&SendTokensResponse {
            amount: locked.scaled_amount,
        })?))
}

/// Lock `transfer.amount` on behalf of a secured remote and build the
/// messages that pay the relayer fee and send the tokens there.
///
/// The home must already hold the tokens and the fee.
pub(crate) fn lock_for_remote(
    storage: &mut dyn Storage,
    config: &Config,
    transfer: OutboundTransfer,
) -> Result<LockedTransfer, ContractError> {
    let chain = parse_chain_id(&transfer.destination_blockchain_id).ok_or_else(|| {
        unknown_destination(
            &transfer.destination_blockchain_id,
            &transfer.destination_transferrer_address,
        )
    })?;
    let key = (
        chain.as_slice(),
        transfer.destination_transferrer_address.as_str(),
    );
    let mut settings = REMOTES.may_load(storage, key)?.ok_or_else(|| {
        unknown_destination(&chain, &transfer.destination_transferrer_address)
    })?;

    // Nothing may be minted remotely before the remote's reserve is backed
    if !settings.is_secured() {
        return Err(ContractError::DestinationNotSecured {
            collateral_needed: settings.collateral_needed,
        });
    }

    let scaled_amount = settings.scale.to_remote(transfer.amount)?;
    if scaled_amount.is_zero() {
        return Err(ContractError::AmountTooSmall {
            reason: format!("{} scales to zero on the destination", transfer.amount),
        });
    }

    settings.transferred_balance = settings
        .transferred_balance
        .checked_add(transfer.amount)
        .map_err(StdError::from)?;
    REMOTES.save(storage, key, &settings)?;

    let mut messages = Vec::with_capacity(2);
    let fee_info = match transfer.fee_token {
        Some(fee_token) if !transfer.fee_amount.is_zero() => {
            messages.push(increase_allowance_msg(
                &fee_token,
                &config.messenger,
                transfer.fee_amount,
            )?);
            FeeInfo::new(fee_token, transfer.fee_amount)
        }
        _ => FeeInfo::none(),
    };

    let payload = TransferrerMessage::SingleHopSend {
        recipient: transfer.recipient,
        amount: scaled_amount,
    }
    .encode()?;
    messages.push(
        SendCrossChainMessageInput {
            destination_blockchain_id: transfer.destination_blockchain_id,
            destination_address: transfer.destination_transferrer_address,
            fee_info,
            required_gas_limit: transfer.required_gas_limit,
            allowed_relayer_addresses: vec![],
            message: payload,
        }
        .into_cosmos_msg(&config.messenger)?,
    );

    Ok(LockedTransfer {
        scaled_amount,
        messages,
    })
}
