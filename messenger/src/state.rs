//! State definitions for the messenger contract
//!
//! Sent messages are kept on the source chain until their receipt arrives;
//! received messages are kept on the destination chain forever so that a
//! message can never be delivered twice.

use common::{ChainId, CrossChainMessage, FeeInfo, MessageReceipt};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract name for migration
pub const CONTRACT_NAME: &str = "crates.io:interchain-messenger";
/// Contract version for migration
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum receipts attached to a single outgoing message
pub const MAX_RECEIPTS_PER_MESSAGE: usize = 5;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    /// This chain's predetermined 4-byte blockchain ID
    pub blockchain_id: ChainId,
    /// May register trusted messengers
    pub admin: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Messenger address trusted as the sender of messages from each source chain
pub const TRUSTED_MESSENGERS: Map<&[u8], String> = Map::new("trusted_messengers");

/// Nonce of the next outgoing message
pub const MESSAGE_NONCE: Item<u64> = Item::new("message_nonce");

// ============================================================================
// Message Store
// ============================================================================

#[cw_serde]
pub enum MessageStatus {
    /// Fee escrowed, no receipt seen yet
    Sent,
    /// Receipt processed, fee credited to the relayer
    Delivered,
}

/// Outgoing message record, keyed by message ID
#[cw_serde]
pub struct SentMessageInfo {
    pub message: CrossChainMessage,
    pub sender: Addr,
    pub fee_info: FeeInfo,
    pub status: MessageStatus,
}

/// Delivered message record, keyed by message ID
#[cw_serde]
pub struct ReceivedMessage {
    pub source_blockchain_id: ChainId,
    pub receipt: MessageReceipt,
}

/// Everything needed to (re-)execute a delivered payload
#[cw_serde]
pub struct MessageExecution {
    pub source_blockchain_id: ChainId,
    pub origin_sender_address: String,
    pub destination_address: String,
    pub message: Binary,
}

/// Payload execution awaiting its reply
#[cw_serde]
pub struct PendingExecution {
    pub message_id: [u8; 32],
    pub execution: MessageExecution,
}

pub const SENT_MESSAGES: Map<&[u8], SentMessageInfo> = Map::new("sent_messages");

pub const RECEIVED_MESSAGES: Map<&[u8], ReceivedMessage> = Map::new("received_messages");

/// Payloads whose execution failed on delivery and may be retried
pub const FAILED_EXECUTIONS: Map<&[u8], MessageExecution> = Map::new("failed_executions");

/// Payload executions awaiting their reply, keyed by reply ID. A payload may
/// deliver further messages to this contract before its own reply arrives.
pub const PENDING_EXECUTIONS: Map<u64, PendingExecution> = Map::new("pending_executions");

/// Reply ID of the next payload execution
pub const NEXT_REPLY_ID: Item<u64> = Item::new("next_reply_id");

// ============================================================================
// Relayer Rewards
// ============================================================================

/// Redeemable relayer rewards, keyed by (redeemer, fee token)
pub const RELAYER_REWARDS: Map<(&str, &str), Uint128> = Map::new("relayer_rewards");
