//! The single-writer chain node.
//!
//! Every public entry point takes `&mut self`: within one chain, calls
//! execute atomically relative to each other, and each call validates all
//! of its preconditions before mutating anything. Deadline-driven
//! transitions are observed lazily through the identity registry on each
//! touch — nothing here runs on a timer.

use std::collections::HashMap;

use serde::Serialize;
use tessera_bridge::{BridgeChannel, BridgeEngine, FeeSchedule, InboundOutcome};
use tessera_heritage::{BadgeFeed, BadgeKind, HeritageBadge, HeritageIssuer};
use tessera_identity::{FinalizeOutcome, IdentityRegistry};
use tessera_messages::BridgeMintMessage;
use tessera_reputation::{ActivityObservation, ReputationLedger};
use tessera_routes::RouteRegistry;
use tessera_token::TokenEvent;
use tessera_types::{
    ChainId, CorrelationId, EventId, IdentityId, IdentityStatus, ProtocolParams, Signature,
    Timestamp, TokenId, WalletAddress,
};

use crate::error::NodeError;

/// Read-model of an identity, computed lazily at `now`.
#[derive(Clone, Debug, Serialize)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub status: IdentityStatus,
    pub primary: Option<WalletAddress>,
    pub linked_wallets: Vec<WalletAddress>,
    /// Sum of individual scores over non-finalized links, honoring each
    /// wallet's activity cutoff.
    pub total_score: u64,
}

/// One chain's node state.
pub struct ChainNode {
    chain: ChainId,
    params: ProtocolParams,
    identities: IdentityRegistry,
    reputation: ReputationLedger,
    heritage: HeritageIssuer,
    routes: RouteRegistry,
    events: HashMap<EventId, TokenEvent>,
    bridge: BridgeEngine,
    channel: Box<dyn BridgeChannel + Send>,
    badge_feed: Box<dyn BadgeFeed + Send + Sync>,
    next_event: u64,
}

impl ChainNode {
    pub fn new(
        chain: ChainId,
        params: ProtocolParams,
        authority: WalletAddress,
        bridge_address: WalletAddress,
        channel: Box<dyn BridgeChannel + Send>,
        badge_feed: Box<dyn BadgeFeed + Send + Sync>,
    ) -> Self {
        let fees = FeeSchedule::new(params.bridge_base_fee);
        let bridge = BridgeEngine::new(chain, bridge_address, fees, &params);
        Self {
            chain,
            identities: IdentityRegistry::new(params.clone()),
            reputation: ReputationLedger::default(),
            heritage: HeritageIssuer::new(),
            routes: RouteRegistry::new(authority),
            events: HashMap::new(),
            bridge,
            channel,
            badge_feed,
            params,
            next_event: 0,
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    // ── Identity ─────────────────────────────────────────────────────────

    pub fn create_identity(
        &mut self,
        caller: &WalletAddress,
        now: Timestamp,
    ) -> Result<IdentityId, NodeError> {
        let id = self.identities.create_identity(caller, now)?;
        tracing::info!(identity = %id, wallet = %caller, "identity created");
        Ok(id)
    }

    pub fn link_wallet(
        &mut self,
        existing: &WalletAddress,
        new_wallet: &WalletAddress,
        sig_existing: &Signature,
        sig_new: &Signature,
        now: Timestamp,
    ) -> Result<IdentityId, NodeError> {
        let id = self
            .identities
            .link_wallet(existing, new_wallet, sig_existing, sig_new, now)?;
        tracing::info!(identity = %id, wallet = %new_wallet, "wallet linked");
        Ok(id)
    }

    /// Elect the given wallet as primary of the identity it belongs to.
    pub fn set_primary_wallet(
        &mut self,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<(), NodeError> {
        let id = self
            .identities
            .identity_of(wallet)
            .ok_or_else(|| NodeError::UnknownWallet(wallet.clone()))?;
        self.identities.set_primary_wallet(id, wallet, now)?;
        tracing::info!(identity = %id, wallet = %wallet, "primary wallet changed");
        Ok(())
    }

    /// Report a wallet compromised. Freezes its activity window at `now`
    /// and opens the dispute record. Returns the dispute deadline.
    pub fn mark_compromised(
        &mut self,
        reporter: &WalletAddress,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<Timestamp, NodeError> {
        let deadline = self.identities.mark_compromised(reporter, wallet, now)?;
        self.reputation.freeze_activity(wallet, now);
        tracing::warn!(wallet = %wallet, deadline = %deadline, "wallet reported compromised");
        Ok(deadline)
    }

    /// Finalize a lapsed compromise report and issue heritage badges for
    /// everything the excluded wallet had earned.
    pub fn finalize_compromise(
        &mut self,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<FinalizeOutcome, NodeError> {
        let outcome = self.identities.finalize_compromise(wallet, now)?;
        let issued = self.heritage.issue_on_finalize(
            outcome.identity,
            &outcome.wallet,
            self.badge_feed.as_ref(),
        );
        tracing::warn!(
            wallet = %wallet,
            identity = %outcome.identity,
            suspended = outcome.suspended,
            badges = issued.len(),
            "compromise finalized"
        );
        Ok(outcome)
    }

    /// The lazily evaluated identity read-model.
    pub fn identity_summary(
        &self,
        id: IdentityId,
        now: Timestamp,
    ) -> Result<IdentitySummary, NodeError> {
        let status = self.identities.effective_status(id, now)?;
        let primary = self.identities.primary_wallet(id, now)?;
        let identity = self
            .identities
            .identity(id)
            .ok_or(tessera_identity::IdentityError::UnknownIdentity(id))?;
        let linked_wallets: Vec<WalletAddress> = identity.linked_wallets().cloned().collect();
        let total_score = self.reputation.aggregate(identity.score_members());
        Ok(IdentitySummary {
            id,
            status,
            primary,
            linked_wallets,
            total_score,
        })
    }

    pub fn identity_of(&self, wallet: &WalletAddress) -> Option<IdentityId> {
        self.identities.identity_of(wallet)
    }

    /// Drain identity lifecycle events for subscribers (external
    /// indexers, subscription feeds).
    pub fn drain_identity_events(&mut self) -> Vec<tessera_identity::IdentityEvent> {
        self.identities.drain_events()
    }

    // ── Reputation ───────────────────────────────────────────────────────

    /// Feed one externally observed activity into the ledger. Returns
    /// whether it counted (observations past a wallet's freeze cutoff are
    /// ignored).
    pub fn record_activity(
        &mut self,
        wallet: &WalletAddress,
        observation: &ActivityObservation,
    ) -> bool {
        self.reputation.record_activity(wallet, observation)
    }

    pub fn individual_score(&self, wallet: &WalletAddress) -> u64 {
        self.reputation.individual_score(wallet)
    }

    // ── Heritage ─────────────────────────────────────────────────────────

    pub fn claim_badge(
        &mut self,
        identity: IdentityId,
        kind: &BadgeKind,
        destination: &WalletAddress,
    ) -> Result<(), NodeError> {
        self.heritage
            .claim_badge(&self.identities, identity, kind, destination)?;
        tracing::info!(identity = %identity, kind = %kind, to = %destination, "heritage badge claimed");
        Ok(())
    }

    pub fn badges_for(&self, identity: IdentityId) -> Vec<&HeritageBadge> {
        self.heritage.badges_for(identity)
    }

    // ── Token events ─────────────────────────────────────────────────────

    /// Deploy a new token event on this chain, wired to this chain's
    /// bridge contract.
    pub fn create_event(
        &mut self,
        owner: WalletAddress,
        max_supply: u64,
        expiry: Option<Timestamp>,
    ) -> EventId {
        let id = EventId::new(self.next_event);
        self.next_event += 1;
        let mut event = TokenEvent::new(id, owner, max_supply, expiry);
        // The node wires its own bridge; the owner keeps pause control.
        event.bridge_contract = Some(self.bridge.local_bridge().clone());
        self.events.insert(id, event);
        tracing::info!(event = %id, max_supply, "token event created");
        id
    }

    fn event_mut(&mut self, id: EventId) -> Result<&mut TokenEvent, NodeError> {
        self.events.get_mut(&id).ok_or(NodeError::UnknownEvent(id))
    }

    pub fn event(&self, id: EventId) -> Result<&TokenEvent, NodeError> {
        self.events.get(&id).ok_or(NodeError::UnknownEvent(id))
    }

    pub fn claim(
        &mut self,
        event: EventId,
        to: &WalletAddress,
        now: Timestamp,
    ) -> Result<TokenId, NodeError> {
        let token = self.event_mut(event)?.claim(to, now)?;
        tracing::info!(event = %event, token = %token, to = %to, "token claimed");
        Ok(token)
    }

    pub fn set_paused(
        &mut self,
        event: EventId,
        caller: &WalletAddress,
        paused: bool,
    ) -> Result<(), NodeError> {
        self.event_mut(event)?.set_paused(caller, paused)?;
        tracing::info!(event = %event, paused, "event pause toggled");
        Ok(())
    }

    // ── Bridge ───────────────────────────────────────────────────────────

    /// Admin: set the peer bridge address for a chain. Idempotent.
    pub fn set_bridge_address(
        &mut self,
        caller: &WalletAddress,
        chain: ChainId,
        address: WalletAddress,
    ) -> Result<bool, NodeError> {
        let changed = self.routes.set_bridge_address(caller, chain, address)?;
        if changed {
            tracing::info!(chain = %chain, "bridge route configured");
        }
        Ok(changed)
    }

    pub fn bridge_address(&self, chain: ChainId) -> Option<&WalletAddress> {
        self.routes.bridge_address(chain)
    }

    pub fn lock_for_bridge(
        &mut self,
        event: EventId,
        caller: &WalletAddress,
        token: TokenId,
    ) -> Result<(), NodeError> {
        self.event_mut(event)?.lock_for_bridge(caller, token)?;
        tracing::info!(event = %event, token = %token, "token locked for bridge");
        Ok(())
    }

    /// Pure read: the messaging fee estimate toward `dest`.
    pub fn estimate_bridge_fee(&self, dest: ChainId) -> u128 {
        self.bridge.estimate_fee(dest)
    }

    /// Submit a token for cross-chain transfer. Returns the correlation
    /// id of the transfer record; progress is polled, never awaited.
    pub fn bridge_to_chain(
        &mut self,
        event: EventId,
        caller: &WalletAddress,
        token: TokenId,
        dest: ChainId,
        fee: u128,
        now: Timestamp,
    ) -> Result<CorrelationId, NodeError> {
        let ev = self.events.get_mut(&event).ok_or(NodeError::UnknownEvent(event))?;
        let correlation = self.bridge.bridge_to_chain(
            &self.routes,
            ev,
            self.channel.as_mut(),
            caller,
            token,
            dest,
            fee,
            now,
        )?;
        Ok(correlation)
    }

    /// Entry point for inbound bridge messages from the delivery layer.
    pub fn handle_bridge_message(
        &mut self,
        message: &BridgeMintMessage,
        now: Timestamp,
    ) -> Result<InboundOutcome, NodeError> {
        let ev = self
            .events
            .get_mut(&message.event)
            .ok_or(NodeError::UnknownEvent(message.event))?;
        let outcome = self
            .bridge
            .handle_inbound(&self.routes, ev, message, now)?;
        Ok(outcome)
    }

    /// Record a remotely observed mint for one of our outbound transfers.
    pub fn record_remote_mint(
        &mut self,
        correlation: CorrelationId,
        mint_tx: tessera_types::TxRef,
    ) -> Result<(), NodeError> {
        self.bridge.record_remote_mint(correlation, mint_tx)?;
        Ok(())
    }

    pub fn transfer(&self, correlation: CorrelationId) -> Option<&tessera_bridge::BridgeTransfer> {
        self.bridge.transfer(correlation)
    }

    /// Outbound transfers whose remote mint is overdue.
    pub fn stalled_transfers(&self, now: Timestamp) -> Vec<CorrelationId> {
        self.bridge.check_stalled(now)
    }
}
