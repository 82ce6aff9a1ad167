//! Badge issuance and claiming.

use std::collections::HashMap;

use crate::badge::{BadgeFeed, BadgeKind, HeritageBadge};
use crate::error::HeritageError;
use tessera_identity::IdentityRegistry;
use tessera_types::{CompromiseState, IdentityId, WalletAddress};

/// Issues and tracks heritage badges, keyed by (identity, kind).
#[derive(Default)]
pub struct HeritageIssuer {
    badges: HashMap<(IdentityId, BadgeKind), HeritageBadge>,
}

impl HeritageIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create unclaimed badges for everything `source_wallet` earned,
    /// called when its compromise report finalizes.
    ///
    /// A kind already present on the identity (from an earlier finalized
    /// wallet) is left untouched — one badge per (identity, kind).
    /// Returns the kinds actually issued.
    pub fn issue_on_finalize(
        &mut self,
        identity: IdentityId,
        source_wallet: &WalletAddress,
        feed: &dyn BadgeFeed,
    ) -> Vec<BadgeKind> {
        let mut issued = Vec::new();
        for kind in feed.earned_badges(source_wallet) {
            let key = (identity, kind.clone());
            if self.badges.contains_key(&key) {
                continue;
            }
            self.badges.insert(
                key,
                HeritageBadge {
                    source_wallet: source_wallet.clone(),
                    identity,
                    kind: kind.clone(),
                    claimed: false,
                    claimed_by: None,
                },
            );
            issued.push(kind);
        }
        issued
    }

    /// Claim a badge to an active, non-compromised wallet of the same
    /// identity. A second claim of the same (identity, kind) is a state
    /// error, never a silent no-op.
    pub fn claim_badge(
        &mut self,
        registry: &IdentityRegistry,
        identity: IdentityId,
        kind: &BadgeKind,
        destination: &WalletAddress,
    ) -> Result<(), HeritageError> {
        let key = (identity, kind.clone());
        let badge = self.badges.get(&key).ok_or_else(|| HeritageError::UnknownBadge {
            identity,
            kind: kind.clone(),
        })?;
        if badge.claimed {
            return Err(HeritageError::AlreadyClaimed {
                identity,
                kind: kind.clone(),
            });
        }
        if registry.identity_of(destination) != Some(identity) {
            return Err(HeritageError::NotMember(destination.clone()));
        }
        let link = registry
            .identity(identity)
            .and_then(|i| i.link(destination))
            .ok_or_else(|| HeritageError::NotMember(destination.clone()))?;
        if link.compromise != CompromiseState::None {
            return Err(HeritageError::CompromisedDestination(destination.clone()));
        }

        let badge = self
            .badges
            .get_mut(&key)
            .ok_or_else(|| HeritageError::UnknownBadge {
                identity,
                kind: kind.clone(),
            })?;
        badge.claimed = true;
        badge.claimed_by = Some(destination.clone());
        Ok(())
    }

    /// All badges (claimed and not) belonging to an identity.
    pub fn badges_for(&self, identity: IdentityId) -> Vec<&HeritageBadge> {
        self.badges
            .values()
            .filter(|b| b.identity == identity)
            .collect()
    }

    pub fn badge(&self, identity: IdentityId, kind: &BadgeKind) -> Option<&HeritageBadge> {
        self.badges.get(&(identity, kind.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::StaticBadgeFeed;
    use tessera_crypto::{derive_address, keypair_from_seed, sign_message};
    use tessera_identity::registry::link_consent_message;
    use tessera_types::{ProtocolParams, Timestamp};

    const DAY: u64 = 24 * 3600;

    /// Identity with wallets A (primary) and B; B compromised + finalized.
    fn finalized_setup() -> (IdentityRegistry, IdentityId, WalletAddress, WalletAddress) {
        let kp_a = keypair_from_seed(&[1; 32]);
        let kp_b = keypair_from_seed(&[2; 32]);
        let a = derive_address(&kp_a.public);
        let b = derive_address(&kp_b.public);
        let mut reg = IdentityRegistry::new(ProtocolParams::tessera_defaults());
        let id = reg.create_identity(&a, Timestamp::new(1_000)).unwrap();
        let msg = link_consent_message(&a, &b);
        reg.link_wallet(
            &a,
            &b,
            &sign_message(&msg, &kp_a.private),
            &sign_message(&msg, &kp_b.private),
            Timestamp::new(2_000),
        )
        .unwrap();
        reg.mark_compromised(&a, &b, Timestamp::new(3_000)).unwrap();
        reg.finalize_compromise(&b, Timestamp::new(3_000 + 31 * DAY))
            .unwrap();
        (reg, id, a, b)
    }

    #[test]
    fn issue_and_claim() {
        let (reg, id, a, b) = finalized_setup();
        let mut feed = StaticBadgeFeed::new();
        feed.grant(b.clone(), BadgeKind::new("genesis-participant"));
        feed.grant(b.clone(), BadgeKind::new("early-verifier"));

        let mut issuer = HeritageIssuer::new();
        let issued = issuer.issue_on_finalize(id, &b, &feed);
        assert_eq!(issued.len(), 2);

        let kind = BadgeKind::new("genesis-participant");
        issuer.claim_badge(&reg, id, &kind, &a).unwrap();
        let badge = issuer.badge(id, &kind).unwrap();
        assert!(badge.claimed);
        assert_eq!(badge.claimed_by.as_ref(), Some(&a));
        assert_eq!(badge.source_wallet, b);
    }

    #[test]
    fn double_claim_is_an_error() {
        let (reg, id, a, b) = finalized_setup();
        let mut feed = StaticBadgeFeed::new();
        let kind = BadgeKind::new("genesis-participant");
        feed.grant(b.clone(), kind.clone());
        let mut issuer = HeritageIssuer::new();
        issuer.issue_on_finalize(id, &b, &feed);

        issuer.claim_badge(&reg, id, &kind, &a).unwrap();
        let err = issuer.claim_badge(&reg, id, &kind, &a).unwrap_err();
        assert!(matches!(err, HeritageError::AlreadyClaimed { .. }));
    }

    #[test]
    fn claim_to_outsider_rejected() {
        let (reg, id, _, b) = finalized_setup();
        let mut feed = StaticBadgeFeed::new();
        let kind = BadgeKind::new("genesis-participant");
        feed.grant(b.clone(), kind.clone());
        let mut issuer = HeritageIssuer::new();
        issuer.issue_on_finalize(id, &b, &feed);

        let stranger = derive_address(&keypair_from_seed(&[9; 32]).public);
        let err = issuer.claim_badge(&reg, id, &kind, &stranger).unwrap_err();
        assert!(matches!(err, HeritageError::NotMember(_)));
    }

    #[test]
    fn claim_to_finalized_source_rejected() {
        let (reg, id, _, b) = finalized_setup();
        let mut feed = StaticBadgeFeed::new();
        let kind = BadgeKind::new("genesis-participant");
        feed.grant(b.clone(), kind.clone());
        let mut issuer = HeritageIssuer::new();
        issuer.issue_on_finalize(id, &b, &feed);

        // The finalized wallet itself is out of the member index.
        let err = issuer.claim_badge(&reg, id, &kind, &b).unwrap_err();
        assert!(matches!(err, HeritageError::NotMember(_)));
    }

    #[test]
    fn reissue_of_existing_kind_is_skipped() {
        let (_, id, _, b) = finalized_setup();
        let mut feed = StaticBadgeFeed::new();
        let kind = BadgeKind::new("genesis-participant");
        feed.grant(b.clone(), kind.clone());
        let mut issuer = HeritageIssuer::new();
        assert_eq!(issuer.issue_on_finalize(id, &b, &feed).len(), 1);
        assert_eq!(issuer.issue_on_finalize(id, &b, &feed).len(), 0);
        assert_eq!(issuer.badges_for(id).len(), 1);
    }

    #[test]
    fn unknown_badge_claim_rejected() {
        let (reg, id, a, _) = finalized_setup();
        let mut issuer = HeritageIssuer::new();
        let err = issuer
            .claim_badge(&reg, id, &BadgeKind::new("never-issued"), &a)
            .unwrap_err();
        assert!(matches!(err, HeritageError::UnknownBadge { .. }));
    }
}
