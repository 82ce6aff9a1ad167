//! State enums for identities, wallet links, tokens, and bridge transfers.

use serde::{Deserialize, Serialize};

/// Identity-level status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityStatus {
    /// A valid non-compromised primary wallet is set.
    Active,
    /// The primary wallet was reported compromised; the dispute window is
    /// open and a replacement primary may still be elected.
    PendingPrimaryCompromise,
    /// The dispute window lapsed with no replacement primary. No primary
    /// wallet; stays suspended until `set_primary_wallet` succeeds.
    Suspended,
}

impl IdentityStatus {
    /// Whether the identity must hold exactly one primary wallet.
    pub fn requires_primary(&self) -> bool {
        matches!(self, Self::Active | Self::PendingPrimaryCompromise)
    }
}

/// Per-wallet compromise lifecycle: None → Pending → Finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompromiseState {
    /// Not reported compromised.
    #[default]
    None,
    /// Reported compromised; dispute window open.
    Pending,
    /// Dispute window lapsed and the report was finalized. Irreversible:
    /// the wallet is permanently excluded and can never be relinked.
    Finalized,
}

impl CompromiseState {
    /// Whether this wallet may be elected primary.
    pub fn primary_eligible(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether this wallet still counts toward the identity's total score.
    pub fn counts_toward_score(&self) -> bool {
        !matches!(self, Self::Finalized)
    }
}

/// Per-token bridge state on its origin chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenBridgeState {
    /// Live and transferable on this chain.
    #[default]
    Unlocked,
    /// Locked pending an outbound bridge message.
    LockedPendingBridge,
    /// Message dispatched; terminal on the source chain. There is no
    /// unlock path by protocol rules.
    BridgedAway,
}

impl TokenBridgeState {
    /// Whether the token is live (owned/transferable) on this chain.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Unlocked | Self::LockedPendingBridge)
    }
}

/// Phase of a cross-chain transfer record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferPhase {
    /// Token locked on the source chain; message not yet dispatched.
    Locked,
    /// Message accepted for delivery; remote mint not yet observed.
    MessageSent,
    /// Remote mint observed.
    Minted,
}
