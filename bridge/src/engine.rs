//! The per-chain bridge engine.
//!
//! One engine instance runs on each chain. Outbound it coordinates the
//! token event (lock → BridgedAway) with the route registry and the
//! delivery channel; inbound it verifies the peer and mints idempotently.

use std::collections::{HashMap, HashSet};

use crate::channel::BridgeChannel;
use crate::error::BridgeError;
use crate::fees::FeeSchedule;
use crate::transfer::BridgeTransfer;
use tessera_messages::{BridgeMintMessage, MessageHeader};
use tessera_routes::RouteRegistry;
use tessera_token::TokenEvent;
use tessera_types::{
    ChainId, CorrelationId, ProtocolParams, Timestamp, TokenBridgeState, TokenId, TransferPhase,
    TxRef, WalletAddress,
};

/// Result of processing one inbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundOutcome {
    /// The token was minted locally.
    Minted { mint_tx: TxRef },
    /// The correlation id was seen before; nothing was minted.
    AlreadyProcessed,
}

/// Bridge protocol state for one chain.
pub struct BridgeEngine {
    chain: ChainId,
    /// This chain's own bridge contract address: the identity inbound
    /// mints run under, and the `source_bridge` stamped on outbound
    /// messages for the peer to verify.
    local_bridge: WalletAddress,
    protocol_version: u16,
    transfer_stale_secs: u64,
    fees: FeeSchedule,
    /// Monotonic per-chain nonce; makes every correlation id fresh.
    next_nonce: u64,
    /// Local ledger transaction sequence for lock/mint references.
    next_tx: u64,
    transfers: HashMap<CorrelationId, BridgeTransfer>,
    processed_inbound: HashSet<CorrelationId>,
}

impl BridgeEngine {
    pub fn new(
        chain: ChainId,
        local_bridge: WalletAddress,
        fees: FeeSchedule,
        params: &ProtocolParams,
    ) -> Self {
        Self {
            chain,
            local_bridge,
            protocol_version: params.protocol_version,
            transfer_stale_secs: params.transfer_stale_secs,
            fees,
            next_nonce: 0,
            next_tx: 0,
            transfers: HashMap::new(),
            processed_inbound: HashSet::new(),
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn local_bridge(&self) -> &WalletAddress {
        &self.local_bridge
    }

    /// Estimate the messaging cost for a destination chain. Pure read.
    pub fn estimate_fee(&self, dest: ChainId) -> u128 {
        self.fees.estimate(dest)
    }

    pub fn fees_mut(&mut self) -> &mut FeeSchedule {
        &mut self.fees
    }

    /// Submit a token for transfer to `dest`.
    ///
    /// The token must be live here and owned by the caller; an Unlocked
    /// token is locked as part of the call, a token already in
    /// LockedPendingBridge proceeds directly. Every precondition (fee,
    /// route, ownership) is checked before any state moves. On success the
    /// token is BridgedAway on this ledger and the transfer record is in
    /// MessageSent — committed once the channel accepts the message, never
    /// waiting on the remote mint.
    pub fn bridge_to_chain(
        &mut self,
        routes: &RouteRegistry,
        event: &mut TokenEvent,
        channel: &mut dyn BridgeChannel,
        caller: &WalletAddress,
        token: TokenId,
        dest: ChainId,
        fee: u128,
        now: Timestamp,
    ) -> Result<CorrelationId, BridgeError> {
        if dest == self.chain {
            return Err(BridgeError::SelfTransfer(dest));
        }
        let state = event.bridge_state(token)?;
        if !state.is_live() {
            return Err(BridgeError::TokenNotBridgeable { token, state });
        }
        match event.owner_of(token) {
            Some(owner) if owner == caller => {}
            _ => {
                return Err(BridgeError::NotTokenOwner {
                    token,
                    caller: caller.clone(),
                })
            }
        }
        let required = self.fees.estimate(dest);
        if fee < required {
            return Err(BridgeError::InsufficientFee {
                required,
                provided: fee,
            });
        }
        if routes.bridge_address(dest).is_none() {
            return Err(BridgeError::RouteNotConfigured(dest));
        }

        let correlation = CorrelationId::new(self.chain, token, self.next_nonce);
        let lock_tx = TxRef::new(self.next_tx);
        // Ownership was just verified, so the caller is the recipient on
        // the destination chain.
        let recipient = caller.clone();
        let message = BridgeMintMessage {
            header: MessageHeader {
                protocol_version: self.protocol_version,
                source_chain: self.chain,
                dest_chain: dest,
                dispatched_at: now,
            },
            correlation,
            event: event.event_id,
            token,
            recipient,
            source_bridge: self.local_bridge.clone(),
            lock_tx,
        };

        if state == TokenBridgeState::Unlocked {
            event.lock_for_bridge(caller, token)?;
        }
        channel.dispatch(&message)?;
        event.mark_bridged_away(token)?;

        self.next_nonce += 1;
        self.next_tx += 1;
        self.transfers.insert(
            correlation,
            BridgeTransfer {
                correlation,
                event: event.event_id,
                token,
                source_chain: self.chain,
                dest_chain: dest,
                phase: TransferPhase::MessageSent,
                lock_tx: Some(lock_tx),
                mint_tx: None,
                dispatched_at: now,
            },
        );
        tracing::info!(
            correlation = %correlation,
            dest = %dest,
            token = %token,
            "bridge transfer dispatched"
        );
        Ok(correlation)
    }

    /// Process one inbound mint message.
    ///
    /// Verifies the message comes from the registered peer bridge of the
    /// claimed source chain, then mints — idempotently: a correlation id
    /// seen before yields `AlreadyProcessed` and mints nothing. Replays
    /// are expected under at-least-once delivery and are not errors.
    pub fn handle_inbound(
        &mut self,
        routes: &RouteRegistry,
        event: &mut TokenEvent,
        message: &BridgeMintMessage,
        _now: Timestamp,
    ) -> Result<InboundOutcome, BridgeError> {
        if message.header.protocol_version != self.protocol_version {
            return Err(BridgeError::UnsupportedVersion {
                got: message.header.protocol_version,
                expected: self.protocol_version,
            });
        }
        if message.header.dest_chain != self.chain {
            return Err(BridgeError::WrongDestination {
                dest: message.header.dest_chain,
                local: self.chain,
            });
        }
        let peer = routes
            .bridge_address(message.header.source_chain)
            .ok_or(BridgeError::RouteNotConfigured(message.header.source_chain))?;
        if peer != &message.source_bridge {
            return Err(BridgeError::UnverifiedPeer {
                claimed: message.source_bridge.clone(),
            });
        }
        if self.processed_inbound.contains(&message.correlation) {
            tracing::debug!(
                correlation = %message.correlation,
                "replayed bridge message ignored"
            );
            return Ok(InboundOutcome::AlreadyProcessed);
        }

        event.mint_from_bridge(&self.local_bridge, &message.recipient, message.token)?;

        let mint_tx = TxRef::new(self.next_tx);
        self.next_tx += 1;
        self.processed_inbound.insert(message.correlation);
        self.transfers.insert(
            message.correlation,
            BridgeTransfer {
                correlation: message.correlation,
                event: message.event,
                token: message.token,
                source_chain: message.header.source_chain,
                dest_chain: self.chain,
                phase: TransferPhase::Minted,
                lock_tx: Some(message.lock_tx),
                mint_tx: Some(mint_tx),
                dispatched_at: message.header.dispatched_at,
            },
        );
        tracing::info!(
            correlation = %message.correlation,
            recipient = %message.recipient,
            "bridged token minted"
        );
        Ok(InboundOutcome::Minted { mint_tx })
    }

    /// Record that the remote mint for an outbound transfer was observed
    /// (polling-driven). Idempotent: observing an already-Minted transfer
    /// again changes nothing.
    pub fn record_remote_mint(
        &mut self,
        correlation: CorrelationId,
        mint_tx: TxRef,
    ) -> Result<(), BridgeError> {
        let transfer = self
            .transfers
            .get_mut(&correlation)
            .ok_or(BridgeError::UnknownTransfer(correlation))?;
        if transfer.phase != TransferPhase::Minted {
            transfer.phase = TransferPhase::Minted;
            transfer.mint_tx = Some(mint_tx);
        }
        Ok(())
    }

    /// The transfer record for a correlation id, if known here.
    pub fn transfer(&self, correlation: CorrelationId) -> Option<&BridgeTransfer> {
        self.transfers.get(&correlation)
    }

    /// Number of transfer records this chain knows about.
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    /// Transfers dispatched from this chain whose remote mint has not been
    /// observed within the staleness window. Surfaced for clients; the
    /// protocol never rolls these back.
    pub fn check_stalled(&self, now: Timestamp) -> Vec<CorrelationId> {
        self.transfers
            .values()
            .filter(|t| t.is_stalled(now, self.transfer_stale_secs))
            .map(|t| t.correlation)
            .collect()
    }

    /// Error-typed view of one transfer: `TransferStalled` when the
    /// staleness window has passed without a remote mint.
    pub fn require_progress(
        &self,
        correlation: CorrelationId,
        now: Timestamp,
    ) -> Result<&BridgeTransfer, BridgeError> {
        let transfer = self
            .transfers
            .get(&correlation)
            .ok_or(BridgeError::UnknownTransfer(correlation))?;
        if transfer.is_stalled(now, self.transfer_stale_secs) {
            return Err(BridgeError::TransferStalled(correlation));
        }
        Ok(transfer)
    }
}
