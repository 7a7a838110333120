//! Token Home Contract
//!
//! Holds the canonical CW20 token on the home chain. Every remote chain gets
//! a collateral ledger entry; tokens sent to a remote are locked here and
//! released only when the remote sends them back. Transfers between two
//! remotes are routed through this contract.
//!
//! ## Module Structure
//!
//! - `contract` - Entry points (instantiate, execute, query, migrate)
//! - `execute/` - Registration, collateral, sends, incoming messages and routing
//! - `query` - Query handlers
//! - `state` - Config and the per-remote collateral ledger

pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
