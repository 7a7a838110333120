//! Execute handlers for the token home contract.
//!
//! - `register` - Admin and remote-initiated registration
//! - `collateral` - AddCollateral
//! - `send` - Send to a remote and the shared lock-and-send path
//! - `receive` - HandleCrossChainMessage and withdrawals
//! - `router` - Multi-hop forwarding between remotes

mod collateral;
mod receive;
mod register;
mod router;
mod send;

pub use collateral::*;
pub use receive::*;
pub use register::*;
pub use send::*;

use common::chain_id_hex;

use crate::error::ContractError;

pub(crate) fn unknown_destination(blockchain_id: &[u8], address: &str) -> ContractError {
    ContractError::UnknownDestination {
        blockchain_id: chain_id_hex(blockchain_id),
        address: address.to_string(),
    }
}

pub(crate) fn untrusted_source(blockchain_id: &[u8], address: &str) -> ContractError {
    ContractError::UntrustedSource {
        blockchain_id: chain_id_hex(blockchain_id),
        address: address.to_string(),
    }
}
