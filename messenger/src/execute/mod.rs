//! Execute handlers for the messenger contract.
//!
//! - `send` - SendCrossChainMessage, AddFeeAmount, SendSpecifiedReceipts
//! - `receive` - ReceiveCrossChainMessage, payload execution and retry
//! - `rewards` - Receipt processing and RedeemRelayerRewards
//! - `config` - Admin registration of trusted source messengers

mod config;
mod receive;
mod rewards;
mod send;

pub use config::*;
pub use receive::*;
pub use rewards::*;
pub use send::*;

use cosmwasm_std::Binary;

use crate::error::ContractError;
use crate::hash::parse_message_id;

pub(crate) fn message_id_from(raw: &Binary) -> Result<[u8; 32], ContractError> {
    parse_message_id(raw).ok_or(ContractError::InvalidMessageId { got: raw.len() })
}
