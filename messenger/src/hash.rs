//! Message ID computation
//!
//! A message ID is unique per source chain and is recomputed by the
//! destination from the relayed envelope, so both sides must agree on the
//! exact byte layout.
//!
//! # Byte Layout (48 bytes total)
//! - Bytes 0-31:  keccak256(source messenger address)
//! - Bytes 32-35: source blockchain ID
//! - Bytes 36-39: destination blockchain ID
//! - Bytes 40-47: message nonce (u64, big-endian)

use common::ChainId;
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

pub fn compute_message_id(
    source_messenger: &str,
    source_blockchain_id: &ChainId,
    destination_blockchain_id: &ChainId,
    nonce: u64,
) -> [u8; 32] {
    let mut data = [0u8; 48];
    data[0..32].copy_from_slice(&keccak256(source_messenger.as_bytes()));
    data[32..36].copy_from_slice(source_blockchain_id);
    data[36..40].copy_from_slice(destination_blockchain_id);
    data[40..48].copy_from_slice(&nonce.to_be_bytes());
    keccak256(&data)
}

/// Parse a 32-byte message ID from its wire form
pub fn parse_message_id(raw: &[u8]) -> Option<[u8; 32]> {
    raw.try_into().ok()
}

/// Convert bytes32 to hex string with 0x prefix
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
