//! Blockchain identifiers.
//!
//! Every chain is identified by a predetermined 4-byte ID. `0x00000000` is
//! reserved and never valid.

use cosmwasm_std::Binary;

/// Length of a blockchain ID in bytes
pub const CHAIN_ID_LEN: usize = 4;

/// A validated 4-byte blockchain ID
pub type ChainId = [u8; CHAIN_ID_LEN];

/// Parse a blockchain ID, rejecting wrong lengths and the reserved zero ID.
pub fn parse_chain_id(raw: &[u8]) -> Option<ChainId> {
    let id: ChainId = raw.try_into().ok()?;
    if id == [0u8; CHAIN_ID_LEN] {
        return None;
    }
    Some(id)
}

/// Render a blockchain ID for attributes and error messages.
pub fn chain_id_hex(id: &[u8]) -> String {
    format!("0x{}", hex::encode(id))
}

/// Convert a blockchain ID back into its wire form.
pub fn chain_id_binary(id: &ChainId) -> Binary {
    Binary::from(id.to_vec())
}
