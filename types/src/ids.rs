//! Record identifiers: identities, token events, tokens, transaction
//! references, and the cross-chain correlation id.

use crate::chain::ChainId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an identity record. Assigned sequentially by the registry
/// on the chain the identity was created on; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityId(u64);

impl IdentityId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity-{}", self.0)
    }
}

/// Identifier of a token event (a supply-capped claimable drop).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(u64);

impl EventId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

/// Identifier of a single token within an event. Sequential per event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(u64);

impl TokenId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token-{}", self.0)
    }
}

/// Opaque reference to the local-ledger transaction that performed an
/// operation (lock, mint). Used to tie bridge transfer records back to
/// ledger history; the ledger assigns these sequentially.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxRef(u64);

impl TxRef {
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

/// Correlation id tying a source-chain lock/message to its destination-chain
/// mint.
///
/// The nonce is monotonically unique per source chain, so the triple is
/// globally unique and safe to key idempotent replay handling on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CorrelationId {
    pub source_chain: ChainId,
    pub token: TokenId,
    pub nonce: u64,
}

impl CorrelationId {
    pub fn new(source_chain: ChainId, token: TokenId, nonce: u64) -> Self {
        Self {
            source_chain,
            token,
            nonce,
        }
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source_chain.as_u64(),
            self.token.as_u64(),
            self.nonce
        )
    }
}
