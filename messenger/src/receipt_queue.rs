//! Receipt queue
//!
//! Receipts created on delivery are owed to the chain the message came from.
//! Each source chain has its own FIFO; outgoing messages to that chain drain
//! it a few receipts at a time.

use common::{ChainId, MessageReceipt};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

#[cw_serde]
#[derive(Default)]
pub struct QueueBounds {
    /// Index of the oldest queued receipt
    pub head: u64,
    /// Index the next receipt is written to
    pub tail: u64,
}

impl QueueBounds {
    pub fn len(&self) -> u64 {
        self.tail - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }
}

pub const RECEIPT_QUEUE_BOUNDS: Map<&[u8], QueueBounds> = Map::new("receipt_queue_bounds");

pub const RECEIPT_QUEUE_ITEMS: Map<(&[u8], u64), MessageReceipt> =
    Map::new("receipt_queue_items");

pub fn enqueue(
    storage: &mut dyn Storage,
    chain: &ChainId,
    receipt: &MessageReceipt,
) -> StdResult<()> {
    let mut bounds = RECEIPT_QUEUE_BOUNDS
        .may_load(storage, chain.as_slice())?
        .unwrap_or_default();
    RECEIPT_QUEUE_ITEMS.save(storage, (chain.as_slice(), bounds.tail), receipt)?;
    bounds.tail += 1;
    RECEIPT_QUEUE_BOUNDS.save(storage, chain.as_slice(), &bounds)
}

/// Remove and return up to `max` of the oldest receipts owed to `chain`.
pub fn dequeue(
    storage: &mut dyn Storage,
    chain: &ChainId,
    max: usize,
) -> StdResult<Vec<MessageReceipt>> {
    let mut bounds = RECEIPT_QUEUE_BOUNDS
        .may_load(storage, chain.as_slice())?
        .unwrap_or_default();
    let mut receipts = Vec::new();
    while !bounds.is_empty() && receipts.len() < max {
        let key = (chain.as_slice(), bounds.head);
        receipts.push(RECEIPT_QUEUE_ITEMS.load(storage, key)?);
        RECEIPT_QUEUE_ITEMS.remove(storage, key);
        bounds.head += 1;
    }
    if !receipts.is_empty() {
        RECEIPT_QUEUE_BOUNDS.save(storage, chain.as_slice(), &bounds)?;
    }
    Ok(receipts)
}

pub fn size(storage: &dyn Storage, chain: &ChainId) -> StdResult<u64> {
    Ok(RECEIPT_QUEUE_BOUNDS
        .may_load(storage, chain.as_slice())?
        .unwrap_or_default()
        .len())
}
