//! Badge records and the external earned-badge feed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tessera_types::{IdentityId, WalletAddress};

/// Kind of a heritage badge, e.g. `"genesis-participant"`.
///
/// Kinds are opaque labels defined by the external badge feed; the
/// protocol only guarantees one claim per (identity, kind).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BadgeKind(String);

impl BadgeKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-transferable attestation inherited from a finalized wallet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeritageBadge {
    pub source_wallet: WalletAddress,
    pub identity: IdentityId,
    pub kind: BadgeKind,
    pub claimed: bool,
    pub claimed_by: Option<WalletAddress>,
}

/// External source of truth for which badge kinds a wallet earned.
///
/// Fed by off-protocol data; the issuer only consumes it at finalization
/// time.
pub trait BadgeFeed {
    fn earned_badges(&self, wallet: &WalletAddress) -> Vec<BadgeKind>;
}

/// A fixed in-memory feed, for tests and development networks.
#[derive(Clone, Debug, Default)]
pub struct StaticBadgeFeed {
    earned: HashMap<WalletAddress, Vec<BadgeKind>>,
}

impl StaticBadgeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, wallet: WalletAddress, kind: BadgeKind) {
        self.earned.entry(wallet).or_default().push(kind);
    }
}

impl BadgeFeed for StaticBadgeFeed {
    fn earned_badges(&self, wallet: &WalletAddress) -> Vec<BadgeKind> {
        self.earned.get(wallet).cloned().unwrap_or_default()
    }
}
