//! Message types for the messenger contract

use common::{CrossChainMessage, FeeInfo, MessageReceipt};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, StdResult, Uint128, WasmMsg};

#[cw_serde]
pub struct InstantiateMsg {
    /// This chain's predetermined 4-byte blockchain ID
    pub blockchain_id: Binary,
    pub admin: String,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Parameters of an outgoing cross-chain message
#[cw_serde]
pub struct SendCrossChainMessageInput {
    pub destination_blockchain_id: Binary,
    pub destination_address: String,
    pub fee_info: FeeInfo,
    pub required_gas_limit: u64,
    /// Relayers allowed to deliver the message (empty = anyone)
    pub allowed_relayer_addresses: Vec<String>,
    pub message: Binary,
}

impl SendCrossChainMessageInput {
    /// Wrap into a message that executes `SendCrossChainMessage` on `messenger`
    pub fn into_cosmos_msg(self, messenger: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: messenger.into(),
            msg: to_json_binary(&ExecuteMsg::SendCrossChainMessage(self))?,
            funds: vec![],
        }
        .into())
    }
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Send a message to another chain, escrowing the relayer fee.
    /// Returns `SendCrossChainMessageResponse` as data.
    SendCrossChainMessage(SendCrossChainMessageInput),

    /// Increase the fee of a message that has not been delivered yet
    AddFeeAmount {
        message_id: Binary,
        fee_token_address: String,
        additional_fee_amount: Uint128,
    },

    /// Deliver a message relayed from `source_blockchain_id`.
    /// Returns `ReceiveCrossChainMessageResponse` as data.
    ReceiveCrossChainMessage {
        source_blockchain_id: Binary,
        source_messenger_address: String,
        message: CrossChainMessage,
        /// Address on the source chain that may redeem the message fee
        relayer_reward_address: String,
    },

    /// Re-execute a delivered payload whose execution failed
    RetryMessageExecution { message_id: Binary },

    /// Send receipts for the given delivered messages back to their source
    /// chain without waiting for regular traffic
    SendSpecifiedReceipts {
        source_blockchain_id: Binary,
        message_ids: Vec<Binary>,
        fee_info: FeeInfo,
        allowed_relayer_addresses: Vec<String>,
    },

    /// Pay out the caller's accumulated rewards in `fee_token_address`.
    /// Returns `RedeemRelayerRewardsResponse` as data.
    RedeemRelayerRewards { fee_token_address: String },

    /// Trust `messenger_address` as the messenger of `blockchain_id` (admin only).
    /// Deliveries claiming any other source messenger are rejected.
    SetTrustedMessenger {
        blockchain_id: Binary,
        messenger_address: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Whether a message has been delivered to this chain
    #[returns(bool)]
    MessageReceived { message_id: Binary },

    #[returns(SentMessageResponse)]
    SentMessage { message_id: Binary },

    /// Receipt of a message delivered to this chain
    #[returns(ReceiptResponse)]
    Receipt { message_id: Binary },

    #[returns(RelayerRewardsResponse)]
    RelayerRewards {
        relayer: String,
        fee_token_address: String,
    },

    /// Receipts waiting to be sent back to a source chain
    #[returns(ReceiptQueueSizeResponse)]
    ReceiptQueueSize { source_blockchain_id: Binary },

    #[returns(FailedMessageResponse)]
    FailedMessage { message_id: Binary },

    #[returns(TrustedMessengerResponse)]
    TrustedMessenger { blockchain_id: Binary },

    /// ID the next message to `destination_blockchain_id` will get
    #[returns(NextMessageIdResponse)]
    NextMessageId { destination_blockchain_id: Binary },
}

// ============================================================================
// Execute Responses
// ============================================================================

#[cw_serde]
pub struct SendCrossChainMessageResponse {
    pub message_id: Binary,
}

#[cw_serde]
pub struct ReceiveCrossChainMessageResponse {
    pub message_id: Binary,
    pub receipt: MessageReceipt,
    /// True if the message had already been delivered and nothing happened
    pub already_delivered: bool,
}

#[cw_serde]
pub struct RedeemRelayerRewardsResponse {
    pub amount: Uint128,
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub blockchain_id: Binary,
    pub admin: String,
    pub message_nonce: u64,
}

#[cw_serde]
pub struct TrustedMessengerResponse {
    pub blockchain_id: Binary,
    pub messenger_address: Option<String>,
}

#[cw_serde]
pub struct SentMessageResponse {
    pub message_id: Binary,
    pub message: CrossChainMessage,
    pub sender: String,
    pub fee_info: FeeInfo,
    pub delivered: bool,
}

#[cw_serde]
pub struct ReceiptResponse {
    pub source_blockchain_id: Binary,
    pub receipt: MessageReceipt,
}

#[cw_serde]
pub struct RelayerRewardsResponse {
    pub relayer: String,
    pub fee_token_address: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ReceiptQueueSizeResponse {
    pub size: u64,
}

#[cw_serde]
pub struct FailedMessageResponse {
    pub message_id: Binary,
    pub source_blockchain_id: Binary,
    pub origin_sender_address: String,
    pub destination_address: String,
    pub message: Binary,
}

#[cw_serde]
pub struct NextMessageIdResponse {
    pub message_id: Binary,
}
