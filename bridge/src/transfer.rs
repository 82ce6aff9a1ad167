//! Cross-chain transfer records.

use serde::{Deserialize, Serialize};
use tessera_types::{
    ChainId, CorrelationId, EventId, Timestamp, TokenId, TransferPhase, TxRef,
};

/// The record correlating a source-chain lock/message with its
/// destination-chain mint.
///
/// Progress is exposed by polling this record — nothing in the protocol
/// blocks waiting for the remote side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeTransfer {
    pub correlation: CorrelationId,
    pub event: EventId,
    pub token: TokenId,
    pub source_chain: ChainId,
    pub dest_chain: ChainId,
    pub phase: TransferPhase,
    /// Known on the source side from dispatch.
    pub lock_tx: Option<TxRef>,
    /// Set once the mint is performed (destination) or observed (source).
    pub mint_tx: Option<TxRef>,
    pub dispatched_at: Timestamp,
}

impl BridgeTransfer {
    /// Whether the transfer has sat in MessageSent longer than
    /// `stale_secs` at `now`.
    pub fn is_stalled(&self, now: Timestamp, stale_secs: u64) -> bool {
        self.phase == TransferPhase::MessageSent
            && self.dispatched_at.plus_secs(stale_secs).is_past(now)
    }
}
