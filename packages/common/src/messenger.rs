//! Messenger wire types.
//!
//! A `CrossChainMessage` is the record a relayer carries from the source
//! chain's messenger to the destination chain's messenger. Contracts that
//! receive cross-chain payloads implement `ReceiverExecuteMsg`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Fee paid to whoever relays a message
#[cw_serde]
pub struct FeeInfo {
    /// CW20 token the fee is denominated in (may be empty when `amount` is zero)
    pub fee_token_address: String,
    /// Fee amount escrowed by the source messenger
    pub amount: Uint128,
}

impl FeeInfo {
    pub fn new(fee_token_address: impl Into<String>, amount: Uint128) -> Self {
        Self {
            fee_token_address: fee_token_address.into(),
            amount,
        }
    }

    /// A fee of zero with no fee token
    pub fn none() -> Self {
        Self::new(String::new(), Uint128::zero())
    }
}

/// Proof that a message was delivered, sent back to the source chain so the
/// relayer can be rewarded there.
#[cw_serde]
pub struct MessageReceipt {
    /// ID of the delivered message (32 bytes)
    pub message_id: Binary,
    /// Address on the source chain entitled to the message fee
    pub relayer_reward_address: String,
}

/// Message record as sent on the source chain and delivered on the destination
#[cw_serde]
pub struct CrossChainMessage {
    /// Per-source-messenger sequence number
    pub message_nonce: u64,
    /// Contract or account that sent the message on the source chain
    pub origin_sender_address: String,
    /// 4-byte destination blockchain ID
    pub destination_blockchain_id: Binary,
    /// Contract to execute the payload against on the destination chain
    pub destination_address: String,
    /// Gas the destination execution requires
    pub required_gas_limit: u64,
    /// Relayers allowed to deliver this message (empty = anyone)
    pub allowed_relayer_addresses: Vec<String>,
    /// Receipts for messages the destination chain sent to the source chain
    pub receipts: Vec<MessageReceipt>,
    /// Opaque application payload
    pub message: Binary,
}

/// Execute interface every cross-chain payload receiver must accept
#[cw_serde]
pub enum ReceiverExecuteMsg {
    /// Called by the local messenger when a message addressed to this
    /// contract is delivered
    HandleCrossChainMessage {
        /// 4-byte source blockchain ID
        source_blockchain_id: Binary,
        /// Sender of the message on the source chain
        origin_sender_address: String,
        /// Application payload
        message: Binary,
    },
}
