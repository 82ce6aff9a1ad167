//! The identity registry state machine.
//!
//! Single-writer: every entry point takes `&mut self` and checks all of
//! its preconditions before mutating anything, so a returned error means
//! no state changed.

use std::collections::{HashMap, HashSet};

use crate::compromise::CompromiseRecord;
use crate::error::IdentityError;
use crate::identity::{Identity, WalletLink};
use tessera_crypto::{decode_address, verify_signature};
use tessera_types::{
    CompromiseState, IdentityId, IdentityStatus, ProtocolParams, Signature, Timestamp,
    WalletAddress,
};

/// Events emitted by the registry for the node to process.
#[derive(Clone, Debug)]
pub enum IdentityEvent {
    IdentityCreated {
        identity: IdentityId,
        wallet: WalletAddress,
    },
    WalletLinked {
        identity: IdentityId,
        wallet: WalletAddress,
    },
    PrimaryChanged {
        identity: IdentityId,
        wallet: WalletAddress,
    },
    CompromiseReported {
        identity: IdentityId,
        wallet: WalletAddress,
        was_primary: bool,
        dispute_deadline: Timestamp,
    },
    CompromiseFinalized {
        identity: IdentityId,
        wallet: WalletAddress,
        suspended: bool,
    },
}

/// Result of finalizing a compromise report.
#[derive(Clone, Debug)]
pub struct FinalizeOutcome {
    pub identity: IdentityId,
    pub wallet: WalletAddress,
    /// True when the finalized wallet was still primary and the identity
    /// dropped to `Suspended` with no primary.
    pub suspended: bool,
}

/// Canonical message both wallets sign to consent to a link.
///
/// Domain-separated and order-sensitive: the existing member signs first
/// position, the joining wallet second.
pub fn link_consent_message(existing: &WalletAddress, new: &WalletAddress) -> Vec<u8> {
    let mut msg = Vec::with_capacity(32 + existing.as_str().len() + new.as_str().len());
    msg.extend_from_slice(b"tessera.identity.link.v1|");
    msg.extend_from_slice(existing.as_str().as_bytes());
    msg.extend_from_slice(b"|");
    msg.extend_from_slice(new.as_str().as_bytes());
    msg
}

/// The registry of all identities on one chain.
pub struct IdentityRegistry {
    params: ProtocolParams,
    identities: HashMap<IdentityId, Identity>,
    /// Acting members: wallet → identity. Finalized wallets are removed.
    wallet_index: HashMap<WalletAddress, IdentityId>,
    /// Every wallet that was ever linked anywhere, forever. Enforces the
    /// lifetime-uniqueness invariant: no relinking, even after
    /// finalization.
    ever_linked: HashSet<WalletAddress>,
    compromises: HashMap<WalletAddress, CompromiseRecord>,
    next_id: u64,
    pending_events: Vec<IdentityEvent>,
}

impl IdentityRegistry {
    pub fn new(params: ProtocolParams) -> Self {
        Self {
            params,
            identities: HashMap::new(),
            wallet_index: HashMap::new(),
            ever_linked: HashSet::new(),
            compromises: HashMap::new(),
            next_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Create a fresh identity with `caller` as its primary wallet.
    ///
    /// Fails if `caller` was ever linked to any identity.
    pub fn create_identity(
        &mut self,
        caller: &WalletAddress,
        now: Timestamp,
    ) -> Result<IdentityId, IdentityError> {
        if self.ever_linked.contains(caller) {
            return Err(IdentityError::WalletAlreadyLinked(caller.clone()));
        }
        let id = IdentityId::new(self.next_id);
        self.next_id += 1;
        self.identities
            .insert(id, Identity::new(id, caller.clone(), now));
        self.wallet_index.insert(caller.clone(), id);
        self.ever_linked.insert(caller.clone());
        self.pending_events.push(IdentityEvent::IdentityCreated {
            identity: id,
            wallet: caller.clone(),
        });
        Ok(id)
    }

    /// Link `new_wallet` into the identity `existing` belongs to.
    ///
    /// Mutual consent: both wallets sign [`link_consent_message`]. The
    /// joining wallet must never have been linked anywhere, and the
    /// consenting member must not be compromised (an attacker holding a
    /// reported wallet cannot drag new wallets into the identity).
    pub fn link_wallet(
        &mut self,
        existing: &WalletAddress,
        new_wallet: &WalletAddress,
        sig_existing: &Signature,
        sig_new: &Signature,
        now: Timestamp,
    ) -> Result<IdentityId, IdentityError> {
        let id = *self
            .wallet_index
            .get(existing)
            .ok_or_else(|| IdentityError::WalletNotLinked(existing.clone()))?;
        if self.ever_linked.contains(new_wallet) {
            return Err(IdentityError::WalletAlreadyLinked(new_wallet.clone()));
        }

        let message = link_consent_message(existing, new_wallet);
        for (wallet, sig) in [(existing, sig_existing), (new_wallet, sig_new)] {
            let key = decode_address(wallet.as_str())
                .ok_or_else(|| IdentityError::InvalidAddress(wallet.clone()))?;
            if !verify_signature(&message, sig, &key) {
                return Err(IdentityError::InvalidSignature(wallet.clone()));
            }
        }

        let identity = self
            .identities
            .get_mut(&id)
            .ok_or(IdentityError::UnknownIdentity(id))?;
        let consenting = identity
            .link(existing)
            .ok_or_else(|| IdentityError::WalletNotMember(existing.clone()))?;
        if consenting.compromise != CompromiseState::None {
            return Err(IdentityError::WalletCompromised(existing.clone()));
        }

        identity.links.insert(
            new_wallet.clone(),
            WalletLink::new(new_wallet.clone(), now, false),
        );
        self.wallet_index.insert(new_wallet.clone(), id);
        self.ever_linked.insert(new_wallet.clone());
        self.pending_events.push(IdentityEvent::WalletLinked {
            identity: id,
            wallet: new_wallet.clone(),
        });
        Ok(id)
    }

    /// Elect `wallet` as the identity's primary.
    ///
    /// Requires the wallet to be a non-compromised member. Regular
    /// rotation (identity currently Active) is gated by the primary
    /// cooldown; recovery elections — while the identity is pending a
    /// primary compromise or suspended — are not, since they are the only
    /// way back to `Active`.
    pub fn set_primary_wallet(
        &mut self,
        id: IdentityId,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<(), IdentityError> {
        let effective = self.effective_status(id, now)?;
        let identity = self
            .identities
            .get_mut(&id)
            .ok_or(IdentityError::UnknownIdentity(id))?;

        let link = identity
            .link(wallet)
            .ok_or_else(|| IdentityError::WalletNotMember(wallet.clone()))?;
        if !link.compromise.primary_eligible() {
            return Err(IdentityError::WalletCompromised(wallet.clone()));
        }

        if effective == IdentityStatus::Active {
            if let Some(last) = identity.last_primary_change {
                let until = last.plus_secs(self.params.primary_cooldown_secs);
                if !until.is_past(now) {
                    return Err(IdentityError::PrimaryCooldown { until });
                }
            }
        }

        if let Some(old) = identity.primary.take() {
            if let Some(old_link) = identity.link_mut(&old) {
                old_link.is_primary = false;
            }
        }
        if let Some(new_link) = identity.link_mut(wallet) {
            new_link.is_primary = true;
        }
        identity.primary = Some(wallet.clone());
        identity.last_primary_change = Some(now);
        identity.status = IdentityStatus::Active;
        self.pending_events.push(IdentityEvent::PrimaryChanged {
            identity: id,
            wallet: wallet.clone(),
        });
        Ok(())
    }

    /// Report a member wallet as compromised.
    ///
    /// Only another linked wallet of the same identity may report — the
    /// compromised wallet cannot self-report, since an attacker controls
    /// it. Freezes the wallet's activity window and opens the dispute
    /// record. Returns the dispute deadline.
    pub fn mark_compromised(
        &mut self,
        reporter: &WalletAddress,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<Timestamp, IdentityError> {
        if reporter == wallet {
            return Err(IdentityError::SelfReport);
        }
        let reporter_id = *self
            .wallet_index
            .get(reporter)
            .ok_or_else(|| IdentityError::WalletNotLinked(reporter.clone()))?;
        let wallet_id = *self
            .wallet_index
            .get(wallet)
            .ok_or_else(|| IdentityError::WalletNotLinked(wallet.clone()))?;
        if reporter_id != wallet_id {
            return Err(IdentityError::ReporterNotMember {
                reporter: reporter.clone(),
                wallet: wallet.clone(),
            });
        }

        let identity = self
            .identities
            .get_mut(&wallet_id)
            .ok_or(IdentityError::UnknownIdentity(wallet_id))?;
        let link = identity
            .link(wallet)
            .ok_or_else(|| IdentityError::WalletNotMember(wallet.clone()))?;
        if link.compromise != CompromiseState::None {
            return Err(IdentityError::AlreadyReported(wallet.clone()));
        }

        let record = CompromiseRecord::new(
            wallet.clone(),
            reporter.clone(),
            now,
            self.params.dispute_window_secs,
        );
        let deadline = record.dispute_deadline;

        let was_primary = identity.primary.as_ref() == Some(wallet);
        if let Some(link) = identity.link_mut(wallet) {
            link.compromise = CompromiseState::Pending;
            link.activity_counts_until = Some(now);
        }
        if was_primary {
            identity.status = IdentityStatus::PendingPrimaryCompromise;
        }
        self.compromises.insert(wallet.clone(), record);
        self.pending_events.push(IdentityEvent::CompromiseReported {
            identity: wallet_id,
            wallet: wallet.clone(),
            was_primary,
            dispute_deadline: deadline,
        });
        Ok(deadline)
    }

    /// Finalize a compromise report after its dispute window lapsed.
    ///
    /// Callable by anyone. Permanently excludes the wallet: it leaves the
    /// acting member set and the score aggregate, and can never be
    /// relinked. If it was still primary, the identity suspends.
    pub fn finalize_compromise(
        &mut self,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<FinalizeOutcome, IdentityError> {
        let record = self
            .compromises
            .get(wallet)
            .ok_or_else(|| IdentityError::NoActiveCompromise(wallet.clone()))?;
        if record.finalized {
            return Err(IdentityError::AlreadyFinalized(wallet.clone()));
        }
        if !record.dispute_deadline.is_past(now) {
            return Err(IdentityError::DisputeWindowOpen {
                wallet: wallet.clone(),
                deadline: record.dispute_deadline,
            });
        }
        let id = *self
            .wallet_index
            .get(wallet)
            .ok_or_else(|| IdentityError::NoActiveCompromise(wallet.clone()))?;
        let identity = self
            .identities
            .get_mut(&id)
            .ok_or(IdentityError::UnknownIdentity(id))?;

        if let Some(link) = identity.link_mut(wallet) {
            link.compromise = CompromiseState::Finalized;
            link.is_primary = false;
        }
        self.wallet_index.remove(wallet);

        let suspended = identity.primary.as_ref() == Some(wallet);
        if suspended {
            identity.primary = None;
            identity.status = IdentityStatus::Suspended;
        }
        if let Some(record) = self.compromises.get_mut(wallet) {
            record.finalized = true;
        }
        self.pending_events.push(IdentityEvent::CompromiseFinalized {
            identity: id,
            wallet: wallet.clone(),
            suspended,
        });
        Ok(FinalizeOutcome {
            identity: id,
            wallet: wallet.clone(),
            suspended,
        })
    }

    /// The lazily evaluated status of an identity at `now`.
    ///
    /// Reports `Suspended` as soon as the primary's dispute deadline has
    /// passed with no replacement elected, whether or not
    /// `finalize_compromise` has run yet. Every status read goes through
    /// here.
    pub fn effective_status(
        &self,
        id: IdentityId,
        now: Timestamp,
    ) -> Result<IdentityStatus, IdentityError> {
        let identity = self
            .identities
            .get(&id)
            .ok_or(IdentityError::UnknownIdentity(id))?;
        if identity.status == IdentityStatus::PendingPrimaryCompromise {
            if let Some(primary) = &identity.primary {
                if let Some(record) = self.compromises.get(primary) {
                    if !record.finalized && record.dispute_deadline.is_past(now) {
                        return Ok(IdentityStatus::Suspended);
                    }
                }
            }
        }
        Ok(identity.status)
    }

    /// The effective primary wallet at `now`: none once the identity is
    /// (lazily) suspended.
    pub fn primary_wallet(
        &self,
        id: IdentityId,
        now: Timestamp,
    ) -> Result<Option<WalletAddress>, IdentityError> {
        match self.effective_status(id, now)? {
            IdentityStatus::Suspended => Ok(None),
            _ => Ok(self
                .identities
                .get(&id)
                .and_then(|identity| identity.primary.clone())),
        }
    }

    pub fn identity(&self, id: IdentityId) -> Option<&Identity> {
        self.identities.get(&id)
    }

    /// The identity a wallet currently acts for, if any. Finalized
    /// wallets resolve to `None`.
    pub fn identity_of(&self, wallet: &WalletAddress) -> Option<IdentityId> {
        self.wallet_index.get(wallet).copied()
    }

    /// Whether a wallet was ever linked to any identity, at any time.
    pub fn was_ever_linked(&self, wallet: &WalletAddress) -> bool {
        self.ever_linked.contains(wallet)
    }

    pub fn compromise_record(&self, wallet: &WalletAddress) -> Option<&CompromiseRecord> {
        self.compromises.get(wallet)
    }

    /// Drain events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<IdentityEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::{derive_address, keypair_from_seed, sign_message};
    use tessera_types::KeyPair;

    const DAY: u64 = 24 * 3600;

    fn params() -> ProtocolParams {
        ProtocolParams::tessera_defaults()
    }

    fn member(seed: u8) -> (KeyPair, WalletAddress) {
        let kp = keypair_from_seed(&[seed; 32]);
        let addr = derive_address(&kp.public);
        (kp, addr)
    }

    /// Create an identity for wallet A and link wallet B into it.
    fn registry_with_pair() -> (IdentityRegistry, IdentityId, WalletAddress, WalletAddress) {
        let (kp_a, a) = member(1);
        let (kp_b, b) = member(2);
        let mut reg = IdentityRegistry::new(params());
        let id = reg.create_identity(&a, Timestamp::new(1_000)).unwrap();
        let msg = link_consent_message(&a, &b);
        let sig_a = sign_message(&msg, &kp_a.private);
        let sig_b = sign_message(&msg, &kp_b.private);
        reg.link_wallet(&a, &b, &sig_a, &sig_b, Timestamp::new(2_000))
            .unwrap();
        (reg, id, a, b)
    }

    #[test]
    fn create_then_link() {
        let (reg, id, a, b) = registry_with_pair();
        let identity = reg.identity(id).unwrap();
        let wallets: Vec<_> = identity.linked_wallets().cloned().collect();
        assert_eq!(wallets.len(), 2);
        assert!(wallets.contains(&a));
        assert!(wallets.contains(&b));
        assert_eq!(identity.primary.as_ref(), Some(&a));
    }

    #[test]
    fn create_twice_rejected() {
        let (_, a) = member(1);
        let mut reg = IdentityRegistry::new(params());
        reg.create_identity(&a, Timestamp::new(1)).unwrap();
        let err = reg.create_identity(&a, Timestamp::new(2)).unwrap_err();
        assert!(matches!(err, IdentityError::WalletAlreadyLinked(_)));
    }

    #[test]
    fn link_requires_both_signatures() {
        let (kp_a, a) = member(1);
        let (_, b) = member(2);
        let (kp_c, _) = member(3);
        let mut reg = IdentityRegistry::new(params());
        reg.create_identity(&a, Timestamp::new(1)).unwrap();
        let msg = link_consent_message(&a, &b);
        let sig_a = sign_message(&msg, &kp_a.private);
        // B's signature produced by the wrong key.
        let forged = sign_message(&msg, &kp_c.private);
        let err = reg
            .link_wallet(&a, &b, &sig_a, &forged, Timestamp::new(2))
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidSignature(_)));
        assert_eq!(reg.identity_of(&b), None);
    }

    #[test]
    fn wallet_never_relinks_even_after_finalization() {
        let (mut reg, _, a, b) = registry_with_pair();
        reg.mark_compromised(&a, &b, Timestamp::new(3_000)).unwrap();
        reg.finalize_compromise(&b, Timestamp::new(3_000 + 31 * DAY))
            .unwrap();
        // B is finalized out — and still cannot create or join an identity.
        let err = reg.create_identity(&b, Timestamp::new(4_000)).unwrap_err();
        assert!(matches!(err, IdentityError::WalletAlreadyLinked(_)));
        assert!(reg.was_ever_linked(&b));
        assert_eq!(reg.identity_of(&b), None);
    }

    #[test]
    fn primary_compromise_opens_dispute() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        let deadline = reg.mark_compromised(&b, &a, now).unwrap();
        assert_eq!(deadline.as_secs(), now.as_secs() + 30 * DAY);
        assert_eq!(
            reg.effective_status(id, now).unwrap(),
            IdentityStatus::PendingPrimaryCompromise
        );
    }

    #[test]
    fn self_report_rejected() {
        let (mut reg, _, a, _) = registry_with_pair();
        let err = reg
            .mark_compromised(&a, &a, Timestamp::new(10_000))
            .unwrap_err();
        assert!(matches!(err, IdentityError::SelfReport));
    }

    #[test]
    fn outsider_cannot_report() {
        let (mut reg, _, a, _) = registry_with_pair();
        let (_, stranger) = member(9);
        let err = reg
            .mark_compromised(&stranger, &a, Timestamp::new(10_000))
            .unwrap_err();
        assert!(matches!(err, IdentityError::WalletNotLinked(_)));
    }

    #[test]
    fn lazy_suspension_after_deadline() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        let deadline = reg.mark_compromised(&b, &a, now).unwrap();
        // Still pending through the whole window.
        assert_eq!(
            reg.effective_status(id, deadline).unwrap(),
            IdentityStatus::PendingPrimaryCompromise
        );
        // Observed as suspended on the next read after the deadline, with
        // no finalize call and no scheduler.
        let after = deadline.plus_secs(1);
        assert_eq!(
            reg.effective_status(id, after).unwrap(),
            IdentityStatus::Suspended
        );
        assert_eq!(reg.primary_wallet(id, after).unwrap(), None);
        // The stored record is only reconciled by finalization.
        assert_eq!(
            reg.identity(id).unwrap().status,
            IdentityStatus::PendingPrimaryCompromise
        );
    }

    #[test]
    fn replacement_primary_before_deadline_reactivates() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&b, &a, now).unwrap();
        reg.set_primary_wallet(id, &b, now.plus_secs(DAY)).unwrap();
        assert_eq!(
            reg.effective_status(id, now.plus_secs(2 * DAY)).unwrap(),
            IdentityStatus::Active
        );
        assert_eq!(
            reg.primary_wallet(id, now.plus_secs(2 * DAY)).unwrap(),
            Some(b.clone())
        );
        // A's later finalization no longer suspends the identity.
        let fin = reg
            .finalize_compromise(&a, now.plus_secs(31 * DAY))
            .unwrap();
        assert!(!fin.suspended);
        assert_eq!(
            reg.effective_status(id, now.plus_secs(32 * DAY)).unwrap(),
            IdentityStatus::Active
        );
    }

    #[test]
    fn finalize_before_deadline_rejected() {
        let (mut reg, _, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        let deadline = reg.mark_compromised(&b, &a, now).unwrap();
        let err = reg.finalize_compromise(&a, deadline).unwrap_err();
        assert!(matches!(err, IdentityError::DisputeWindowOpen { .. }));
    }

    #[test]
    fn finalize_primary_without_replacement_suspends() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&b, &a, now).unwrap();
        let fin = reg
            .finalize_compromise(&a, now.plus_secs(31 * DAY))
            .unwrap();
        assert!(fin.suspended);
        let later = now.plus_secs(32 * DAY);
        assert_eq!(
            reg.effective_status(id, later).unwrap(),
            IdentityStatus::Suspended
        );
        // Recovery: electing B as primary reactivates, bypassing cooldown.
        reg.set_primary_wallet(id, &b, later).unwrap();
        assert_eq!(
            reg.effective_status(id, later).unwrap(),
            IdentityStatus::Active
        );
        // A is excluded from the score aggregate.
        let members: Vec<_> = reg.identity(id).unwrap().score_members().cloned().collect();
        assert_eq!(members, vec![b.clone()]);
    }

    #[test]
    fn double_finalize_rejected() {
        let (mut reg, _, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&b, &a, now).unwrap();
        reg.finalize_compromise(&a, now.plus_secs(31 * DAY)).unwrap();
        let err = reg
            .finalize_compromise(&a, now.plus_secs(32 * DAY))
            .unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyFinalized(_)));
    }

    #[test]
    fn compromised_wallet_cannot_become_primary() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&a, &b, now).unwrap();
        let err = reg
            .set_primary_wallet(id, &b, now.plus_secs(1))
            .unwrap_err();
        assert!(matches!(err, IdentityError::WalletCompromised(_)));
    }

    #[test]
    fn rotation_gated_by_cooldown() {
        let (mut reg, id, _, b) = registry_with_pair();
        // Identity created at t=1000; cooldown is 14 days.
        let too_soon = Timestamp::new(1_000 + DAY);
        let err = reg.set_primary_wallet(id, &b, too_soon).unwrap_err();
        assert!(matches!(err, IdentityError::PrimaryCooldown { .. }));
        let later = Timestamp::new(1_000 + 15 * DAY);
        reg.set_primary_wallet(id, &b, later).unwrap();
        assert_eq!(reg.primary_wallet(id, later).unwrap(), Some(b));
    }

    #[test]
    fn compromised_member_cannot_consent_to_links() {
        let (mut reg, _, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&a, &b, now).unwrap();
        let (kp_c, c) = member(7);
        let (kp_b, _) = member(2);
        let msg = link_consent_message(&b, &c);
        let sig_b = sign_message(&msg, &kp_b.private);
        let sig_c = sign_message(&msg, &kp_c.private);
        let err = reg
            .link_wallet(&b, &c, &sig_b, &sig_c, now.plus_secs(1))
            .unwrap_err();
        assert!(matches!(err, IdentityError::WalletCompromised(_)));
    }

    #[test]
    fn lifecycle_emits_events_in_order() {
        let (mut reg, _, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&b, &a, now).unwrap();
        reg.finalize_compromise(&a, now.plus_secs(31 * DAY)).unwrap();

        let events = reg.drain_events();
        assert!(matches!(events[0], IdentityEvent::IdentityCreated { .. }));
        assert!(matches!(events[1], IdentityEvent::WalletLinked { .. }));
        assert!(matches!(
            events[2],
            IdentityEvent::CompromiseReported {
                was_primary: true,
                ..
            }
        ));
        assert!(matches!(
            events[3],
            IdentityEvent::CompromiseFinalized {
                suspended: true,
                ..
            }
        ));
        // Draining empties the queue.
        assert!(reg.drain_events().is_empty());
    }

    #[test]
    fn non_primary_compromise_keeps_identity_active() {
        let (mut reg, id, a, b) = registry_with_pair();
        let now = Timestamp::new(10_000);
        reg.mark_compromised(&a, &b, now).unwrap();
        assert_eq!(
            reg.effective_status(id, now.plus_secs(40 * DAY)).unwrap(),
            IdentityStatus::Active
        );
        // The flagged wallet's activity window froze at the report.
        let link = reg.identity(id).unwrap().link(&b).unwrap();
        assert_eq!(link.activity_counts_until, Some(now));
    }
}
