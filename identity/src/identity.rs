//! Identity and wallet-link records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tessera_types::{CompromiseState, IdentityId, IdentityStatus, Timestamp, WalletAddress};

/// One wallet's membership in an identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletLink {
    pub wallet: WalletAddress,
    pub linked_at: Timestamp,
    pub is_primary: bool,
    pub compromise: CompromiseState,
    /// Activity cutoff, set the moment the wallet is reported compromised.
    /// Score inputs at or after this point are ignored by the reputation
    /// ledger; history before it is preserved.
    pub activity_counts_until: Option<Timestamp>,
}

impl WalletLink {
    pub fn new(wallet: WalletAddress, linked_at: Timestamp, is_primary: bool) -> Self {
        Self {
            wallet,
            linked_at,
            is_primary,
            compromise: CompromiseState::None,
            activity_counts_until: None,
        }
    }
}

/// An identity record unifying multiple wallets. Never deleted.
///
/// `links` retains finalized wallets (marked `Finalized`) for history; the
/// linked-wallet and score views filter them out.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub primary: Option<WalletAddress>,
    pub links: BTreeMap<WalletAddress, WalletLink>,
    /// Stored status. Reads must go through the registry's lazy view,
    /// which reports `Suspended` once the primary's dispute deadline has
    /// passed even before the status is durably reconciled.
    pub status: IdentityStatus,
    pub created_at: Timestamp,
    pub last_primary_change: Option<Timestamp>,
}

impl Identity {
    pub fn new(id: IdentityId, first_wallet: WalletAddress, now: Timestamp) -> Self {
        let mut links = BTreeMap::new();
        links.insert(
            first_wallet.clone(),
            WalletLink::new(first_wallet.clone(), now, true),
        );
        Self {
            id,
            primary: Some(first_wallet),
            links,
            status: IdentityStatus::Active,
            created_at: now,
            last_primary_change: Some(now),
        }
    }

    /// Current members: linked wallets that are not finalized out.
    pub fn linked_wallets(&self) -> impl Iterator<Item = &WalletAddress> {
        self.links
            .values()
            .filter(|l| l.compromise != CompromiseState::Finalized)
            .map(|l| &l.wallet)
    }

    /// Wallets whose score still counts toward the identity total.
    pub fn score_members(&self) -> impl Iterator<Item = &WalletAddress> {
        self.links
            .values()
            .filter(|l| l.compromise.counts_toward_score())
            .map(|l| &l.wallet)
    }

    pub fn link(&self, wallet: &WalletAddress) -> Option<&WalletLink> {
        self.links.get(wallet)
    }

    pub(crate) fn link_mut(&mut self, wallet: &WalletAddress) -> Option<&mut WalletLink> {
        self.links.get_mut(wallet)
    }
}
