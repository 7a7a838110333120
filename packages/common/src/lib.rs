//! Common - Shared Types and Utilities for the Interchain Contracts
//!
//! This package provides the wire types exchanged between chains and the
//! helpers shared by the messenger, token home and token remote contracts.

pub mod chain;
pub mod funds;
pub mod messenger;
pub mod scaling;
pub mod transfer;

pub use chain::{chain_id_binary, chain_id_hex, parse_chain_id, ChainId};
pub use funds::FundsError;
pub use messenger::{CrossChainMessage, FeeInfo, MessageReceipt, ReceiverExecuteMsg};
pub use scaling::TokenScale;
pub use transfer::{SendTokensInput, SendTokensResponse, TransferrerMessage};
