//! Interchain Messenger Contract
//!
//! Lets a contract on one chain invoke logic on another chain. Senders escrow
//! a fee for the relayer, the destination messenger delivers each message
//! exactly once and records a receipt, and the receipt travels back to the
//! source chain where it releases the fee to the relayer's reward balance.
//!
//! ## Module Structure
//!
//! - `contract` - Entry points (instantiate, execute, reply, query, migrate)
//! - `execute/` - Execute handlers (send, receive, rewards)
//! - `query` - Query handlers
//! - `state` - Message store and reward ledger
//! - `receipt_queue` - Receipts owed to each source chain
//! - `hash` - Message ID computation

pub mod contract;
pub mod error;
pub mod execute;
pub mod hash;
pub mod msg;
pub mod query;
pub mod receipt_queue;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::compute_message_id;
