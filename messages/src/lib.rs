//! Cross-chain bridge message types and wire codec.
//!
//! The messaging channel underneath is an at-least-once delivery
//! primitive with unbounded latency: messages can arrive late, repeatedly,
//! and in any order across tokens. Everything needed for idempotent
//! processing (the correlation id) and for peer verification (the source
//! bridge address) travels in the message itself.

pub mod codec;
pub mod error;

pub use codec::{decode_frame, encode_frame, MAX_MESSAGE_SIZE};
pub use error::MessageError;

use serde::{Deserialize, Serialize};
use tessera_types::{
    ChainId, CorrelationId, EventId, Timestamp, TokenId, TxRef, WalletAddress,
};

/// Header present on every bridge message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub protocol_version: u16,
    pub source_chain: ChainId,
    pub dest_chain: ChainId,
    /// Dispatch time on the source chain. Informational; replay handling
    /// never keys on it.
    pub dispatched_at: Timestamp,
}

/// Instructs the destination chain to mint a bridged token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMintMessage {
    pub header: MessageHeader,
    pub correlation: CorrelationId,
    pub event: EventId,
    pub token: TokenId,
    /// Owner of the token at lock time on the source chain.
    pub recipient: WalletAddress,
    /// The bridge contract that emitted this message. The destination
    /// verifies it against its route registry entry for
    /// `header.source_chain` before minting.
    pub source_bridge: WalletAddress,
    /// Source-ledger transaction that performed the lock.
    pub lock_tx: TxRef,
}
