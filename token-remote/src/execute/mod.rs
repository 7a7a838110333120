//! Execute handlers for the token remote contract.
//!
//! - `send` - RegisterWithHome, SendToHome, SendAndForward
//! - `receive` - HandleCrossChainMessage (mint)

mod receive;
mod send;

pub use receive::*;
pub use send::*;
