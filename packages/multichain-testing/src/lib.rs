//! Multi-chain test network.
//!
//! Every chain is an independent cw-multi-test `App` with its own messenger.
//! Chains never see each other's state; the only way across is
//! [`relay_message`], which reads a sent message on the source chain and
//! delivers it on the destination chain like an off-chain relayer would.

pub mod chain;
pub mod relayer;

pub use chain::{connect, Chain, RemoteDeployment};
pub use relayer::{relay_all, relay_message, return_receipts, reward_address, sent_message_ids};

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
