use common::FundsError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Funds(#[from] FundsError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Untrusted source messenger {address} for chain {blockchain_id}")]
    UntrustedSource {
        blockchain_id: String,
        address: String,
    },

    #[error("Invalid messenger address: must not be empty")]
    InvalidMessengerAddress,

    #[error("Invalid chain ID: {reason}")]
    InvalidChainId { reason: String },

    #[error("Invalid destination: {reason}")]
    InvalidDestination { reason: String },

    #[error("Invalid required gas limit: must be greater than zero")]
    InvalidRequiredGas,

    #[error("Invalid message ID: expected 32 bytes, got {got}")]
    InvalidMessageId { got: usize },

    #[error("Invalid fee amount: {reason}")]
    InvalidFeeAmount { reason: String },

    #[error("Unknown message: {message_id}")]
    UnknownMessage { message_id: String },

    #[error("Message already delivered: {message_id}")]
    MessageAlreadyDelivered { message_id: String },

    #[error("Fee token mismatch: expected {expected}, got {got}")]
    FeeTokenMismatch { expected: String, got: String },

    #[error("Unauthorized relayer: {relayer}")]
    UnauthorizedRelayer { relayer: String },

    #[error("Invalid relayer reward address: must not be empty")]
    InvalidRelayerRewardAddress,

    #[error("Message execution has not failed: {message_id}")]
    MessageExecutionNotFailed { message_id: String },

    #[error("Unknown reply ID: {id}")]
    UnknownReplyId { id: u64 },
}
