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

    #[error("Invalid chain ID: {reason}")]
    InvalidChainId { reason: String },

    #[error("Invalid home transferrer address: must not be empty")]
    InvalidHomeAddress,

    #[error("Invalid decimals: home {home_decimals}, remote {remote_decimals}")]
    InvalidDecimals {
        home_decimals: u8,
        remote_decimals: u8,
    },

    #[error("Invalid recipient: must not be empty")]
    InvalidRecipient,

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid destination: {reason}")]
    InvalidDestination { reason: String },

    #[error("Invalid required gas limit: must be greater than zero")]
    InvalidRequiredGas,

    #[error("Amount too small: {reason}")]
    AmountTooSmall { reason: String },

    #[error("Not collateralized: no tokens have been received from the home yet")]
    NotCollateralized,

    #[error("Untrusted source: {blockchain_id} {address}")]
    UntrustedSource {
        blockchain_id: String,
        address: String,
    },

    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },
}
