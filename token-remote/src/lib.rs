//! Token Remote Contract
//!
//! Represents a home chain token on a remote chain. The remote is the minter
//! of a CW20 token: transfers from the home mint it, transfers back to the
//! home (or onward to another remote through the home) burn it.

pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
