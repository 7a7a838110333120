//! Token transferrer payloads and send inputs.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_binary, Binary, StdResult, Uint128};

/// Payload carried by the messenger between a token home and its remotes
#[cw_serde]
pub enum TransferrerMessage {
    /// Remote -> home: register the sending remote
    RegisterRemote {
        /// Synthetic supply the remote starts with, in remote units
        initial_reserve_imbalance: Uint128,
        /// Decimals of the remote token
        remote_decimals: u8,
    },
    /// Either direction: deliver `amount` (receiver's units on the way out
    /// of the home, sender's units on the way in) to `recipient`
    SingleHopSend { recipient: String, amount: Uint128 },
    /// Remote A -> home: forward to another remote B.
    /// `amount` is in remote A units, `secondary_fee` in home units.
    MultiHopSend {
        destination_blockchain_id: Binary,
        destination_transferrer_address: String,
        recipient: String,
        amount: Uint128,
        secondary_fee: Uint128,
        secondary_gas_limit: u64,
    },
}

impl TransferrerMessage {
    pub fn encode(&self) -> StdResult<Binary> {
        to_json_binary(self)
    }

    pub fn decode(payload: &Binary) -> StdResult<Self> {
        from_json(payload)
    }
}

/// Parameters shared by every token send
#[cw_serde]
pub struct SendTokensInput {
    /// 4-byte destination blockchain ID
    pub destination_blockchain_id: Binary,
    /// Token transferrer on the destination chain
    pub destination_transferrer_address: String,
    /// Final recipient of the tokens
    pub recipient: String,
    /// Token the primary (first hop) relayer fee is paid in
    pub primary_fee_token_address: String,
    /// Primary relayer fee
    pub primary_fee: Uint128,
    /// Second hop relayer fee in home token units (multi-hop only)
    pub secondary_fee: Uint128,
    /// Gas required by the destination transferrer
    pub required_gas_limit: u64,
}

/// Response data of a token send
#[cw_serde]
pub struct SendTokensResponse {
    /// Amount credited on the next chain, in that chain's units
    pub amount: Uint128,
}
