use common::FundsError;
use cosmwasm_std::{StdError, Uint128};
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

    #[error("Invalid remote address: must not be empty")]
    InvalidRemoteAddress,

    #[error("Invalid recipient: must not be empty")]
    InvalidRecipient,

    #[error("Invalid token multiplier: must be greater than zero")]
    InvalidMultiplier,

    #[error("Invalid decimals: home {home_decimals}, remote {remote_decimals}")]
    InvalidDecimals {
        home_decimals: u8,
        remote_decimals: u8,
    },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Remote already registered: {blockchain_id} {address}")]
    AlreadyRegistered {
        blockchain_id: String,
        address: String,
    },

    #[error("Unknown destination: {blockchain_id} {address}")]
    UnknownDestination {
        blockchain_id: String,
        address: String,
    },

    #[error("Destination not secured: {collateral_needed} collateral still needed")]
    DestinationNotSecured { collateral_needed: Uint128 },

    #[error("Destination already secured")]
    AlreadySecured,

    #[error("Amount too small: {reason}")]
    AmountTooSmall { reason: String },

    #[error("Non-zero secondary fee: single-hop sends have no second hop")]
    NonZeroSecondaryFee,

    #[error("Untrusted source: {blockchain_id} {address}")]
    UntrustedSource {
        blockchain_id: String,
        address: String,
    },

    #[error("Transferred balance exceeded: requested {requested}, available {available}")]
    TransferredBalanceExceeded {
        requested: Uint128,
        available: Uint128,
    },
}
