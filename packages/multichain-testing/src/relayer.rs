//! Simulated off-chain relayer.
//!
//! Picks sent messages out of transaction events on the source chain and
//! delivers them to the destination messenger. Delivery may be repeated,
//! reordered or raced between relayers; the messenger is expected to cope.

use anyhow::{anyhow, bail};
use cosmwasm_std::{from_json, Addr, Binary};
use cw_multi_test::{AppResponse, Executor};
use tracing::{info, warn};

use common::{chain_id_hex, FeeInfo};
use messenger::msg::{ExecuteMsg as MessengerExecuteMsg, ReceiveCrossChainMessageResponse};

use crate::chain::Chain;

const SEND_EVENT: &str = "wasm-send_cross_chain_message";

/// IDs of every message sent during a transaction, in emission order
pub fn sent_message_ids(res: &AppResponse) -> anyhow::Result<Vec<Binary>> {
    res.events
        .iter()
        .filter(|event| event.ty == SEND_EVENT)
        .map(|event| {
            let hex_id = event
                .attributes
                .iter()
                .find(|attr| attr.key == "message_id")
                .map(|attr| attr.value.as_str())
                .ok_or_else(|| anyhow!("{SEND_EVENT} without message_id"))?;
            let bytes = hex::decode(hex_id.trim_start_matches("0x"))?;
            Ok(Binary::from(bytes))
        })
        .collect()
}

/// Relayer reward address used for `relayer`
pub fn reward_address(relayer: &str) -> String {
    format!("{relayer}_rewards")
}

/// Deliver one message from `source` to `destination` as `relayer`
pub fn relay_message(
    source: &Chain,
    destination: &mut Chain,
    message_id: &Binary,
    relayer: &str,
) -> anyhow::Result<AppResponse> {
    let sent = source.sent_message(message_id)?;
    if sent.message.destination_blockchain_id.as_slice() != destination.blockchain_id.as_slice() {
        bail!(
            "message {} is for {}, not {}",
            hex::encode(message_id),
            chain_id_hex(&sent.message.destination_blockchain_id),
            destination.name
        );
    }

    let res = destination.app.execute_contract(
        Addr::unchecked(relayer),
        destination.messenger.clone(),
        &MessengerExecuteMsg::ReceiveCrossChainMessage {
            source_blockchain_id: source.blockchain_id_binary(),
            source_messenger_address: source.messenger.to_string(),
            message: sent.message,
            relayer_reward_address: reward_address(relayer),
        },
        &[],
    );

    match &res {
        Ok(response) => {
            let delivered: Option<ReceiveCrossChainMessageResponse> = response
                .data
                .as_ref()
                .and_then(|data| from_json(data).ok());
            if delivered.map_or(false, |d| d.already_delivered) {
                warn!(
                    source = %source.name,
                    destination = %destination.name,
                    message_id = %hex::encode(message_id),
                    relayer,
                    "Message already delivered, skipping"
                );
            } else {
                info!(
                    source = %source.name,
                    destination = %destination.name,
                    message_id = %hex::encode(message_id),
                    relayer,
                    "Message relayed"
                );
            }
        }
        Err(e) => warn!(
            source = %source.name,
            destination = %destination.name,
            message_id = %hex::encode(message_id),
            error = %e,
            "Relay failed"
        ),
    }
    res
}

/// Deliver every message sent in `res` that is addressed to `destination`
pub fn relay_all(
    source: &Chain,
    destination: &mut Chain,
    res: &AppResponse,
    relayer: &str,
) -> anyhow::Result<Vec<AppResponse>> {
    let mut responses = vec![];
    for message_id in sent_message_ids(res)? {
        let sent = source.sent_message(&message_id)?;
        if sent.message.destination_blockchain_id.as_slice()
            != destination.blockchain_id.as_slice()
        {
            continue;
        }
        responses.push(relay_message(source, destination, &message_id, relayer)?);
    }
    info!(
        source = %source.name,
        destination = %destination.name,
        count = responses.len(),
        "Relayed batch"
    );
    Ok(responses)
}

/// Send receipts for `message_ids` (delivered on `destination`) back to
/// `source` and relay them there
pub fn return_receipts(
    destination: &mut Chain,
    source: &mut Chain,
    message_ids: &[Binary],
    relayer: &str,
) -> anyhow::Result<AppResponse> {
    let res = destination.app.execute_contract(
        Addr::unchecked(relayer),
        destination.messenger.clone(),
        &MessengerExecuteMsg::SendSpecifiedReceipts {
            source_blockchain_id: source.blockchain_id_binary(),
            message_ids: message_ids.to_vec(),
            fee_info: FeeInfo::none(),
            allowed_relayer_addresses: vec![],
        },
        &[],
    )?;
    let receipt_message = sent_message_ids(&res)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("SendSpecifiedReceipts sent no message"))?;
    info!(
        source = %destination.name,
        destination = %source.name,
        receipts = message_ids.len(),
        "Returning receipts"
    );
    relay_message(destination, source, &receipt_message, relayer)
}
