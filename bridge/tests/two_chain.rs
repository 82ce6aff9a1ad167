//! End-to-end transfer tests across two simulated chains.

use proptest::prelude::*;

use tessera_bridge::{BridgeEngine, BridgeError, FeeSchedule, InboundOutcome, LocalChannel};
use tessera_routes::RouteRegistry;
use tessera_token::TokenEvent;
use tessera_types::{
    ChainId, EventId, ProtocolParams, Timestamp, TokenBridgeState, TransferPhase, WalletAddress,
};

const CHAIN_A: ChainId = ChainId::new(1);
const CHAIN_B: ChainId = ChainId::new(2);

struct Chain {
    routes: RouteRegistry,
    event: TokenEvent,
    engine: BridgeEngine,
}

fn bridge_addr(chain: ChainId) -> WalletAddress {
    WalletAddress::new(format!("tsra_bridge_chain{}", chain.as_u64()))
}

fn owner() -> WalletAddress {
    WalletAddress::new("tsra_event_owner")
}

fn holder() -> WalletAddress {
    WalletAddress::new("tsra_holder")
}

/// A chain with the event deployed, its own bridge configured, and a
/// route to the peer chain.
fn chain(local: ChainId, peer: ChainId) -> Chain {
    let params = ProtocolParams::tessera_defaults();
    let mut routes = RouteRegistry::new(owner());
    routes
        .set_bridge_address(&owner(), peer, bridge_addr(peer))
        .unwrap();
    let mut event = TokenEvent::new(EventId::new(1), owner(), 100, None);
    event
        .set_bridge_contract(&owner(), bridge_addr(local))
        .unwrap();
    let engine = BridgeEngine::new(
        local,
        bridge_addr(local),
        FeeSchedule::new(params.bridge_base_fee),
        &params,
    );
    Chain {
        routes,
        event,
        engine,
    }
}

fn two_chains() -> (Chain, Chain) {
    (chain(CHAIN_A, CHAIN_B), chain(CHAIN_B, CHAIN_A))
}

#[test]
fn lock_message_mint_roundtrip() {
    let (mut a, mut b) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);

    let token = a.event.claim(&holder(), now).unwrap();
    a.event.lock_for_bridge(&holder(), token).unwrap();

    let fee = a.engine.estimate_fee(CHAIN_B);
    let correlation = a
        .engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap();

    // Source side: terminal, record in MessageSent.
    assert_eq!(
        a.event.bridge_state(token).unwrap(),
        TokenBridgeState::BridgedAway
    );
    assert!(!a.event.is_live(token));
    let record = a.engine.transfer(correlation).unwrap();
    assert_eq!(record.phase, TransferPhase::MessageSent);

    // Delivery and destination mint.
    let delivered = channel.drain();
    assert_eq!(delivered.len(), 1);
    let outcome = b
        .engine
        .handle_inbound(&b.routes, &mut b.event, &delivered[0], now.plus_secs(60))
        .unwrap();
    assert!(matches!(outcome, InboundOutcome::Minted { .. }));
    assert!(b.event.is_live(token));
    assert_eq!(b.event.owner_of(token), Some(&holder()));
    assert_eq!(
        b.engine.transfer(correlation).unwrap().phase,
        TransferPhase::Minted
    );

    // Source observes the mint by polling.
    let mint_tx = match outcome {
        InboundOutcome::Minted { mint_tx } => mint_tx,
        InboundOutcome::AlreadyProcessed => unreachable!(),
    };
    a.engine.record_remote_mint(correlation, mint_tx).unwrap();
    assert_eq!(
        a.engine.transfer(correlation).unwrap().phase,
        TransferPhase::Minted
    );
}

#[test]
fn insufficient_fee_leaves_token_unlocked() {
    let (mut a, _) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);
    let token = a.event.claim(&holder(), now).unwrap();

    let fee = a.engine.estimate_fee(CHAIN_B);
    let err = a
        .engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee - 1,
            now,
        )
        .unwrap_err();
    assert!(matches!(err, BridgeError::InsufficientFee { .. }));
    assert_eq!(
        a.event.bridge_state(token).unwrap(),
        TokenBridgeState::Unlocked
    );
    assert_eq!(channel.pending(), 0);
    assert_eq!(a.engine.transfer_count(), 0);
}

#[test]
fn unconfigured_route_rejected() {
    let (mut a, _) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);
    let token = a.event.claim(&holder(), now).unwrap();
    let unknown = ChainId::new(77);
    let err = a
        .engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            unknown,
            a.engine.estimate_fee(unknown),
            now,
        )
        .unwrap_err();
    assert!(matches!(err, BridgeError::RouteNotConfigured(_)));
    assert_eq!(
        a.event.bridge_state(token).unwrap(),
        TokenBridgeState::Unlocked
    );
}

#[test]
fn replayed_message_mints_once() {
    let (mut a, mut b) = two_chains();
    let mut channel = LocalChannel::new();
    channel.deliver_twice = true;
    let now = Timestamp::new(1_000);

    let token = a.event.claim(&holder(), now).unwrap();
    let fee = a.engine.estimate_fee(CHAIN_B);
    a.engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap();

    let delivered = channel.drain();
    assert_eq!(delivered.len(), 2);
    let first = b
        .engine
        .handle_inbound(&b.routes, &mut b.event, &delivered[0], now)
        .unwrap();
    let second = b
        .engine
        .handle_inbound(&b.routes, &mut b.event, &delivered[1], now)
        .unwrap();
    assert!(matches!(first, InboundOutcome::Minted { .. }));
    assert_eq!(second, InboundOutcome::AlreadyProcessed);
    assert!(b.event.is_live(token));
}

#[test]
fn message_from_unregistered_peer_rejected() {
    let (mut a, mut b) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);

    let token = a.event.claim(&holder(), now).unwrap();
    let fee = a.engine.estimate_fee(CHAIN_B);
    a.engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap();

    let mut msg = channel.drain().remove(0);
    msg.source_bridge = WalletAddress::new("tsra_impostor");
    let err = b
        .engine
        .handle_inbound(&b.routes, &mut b.event, &msg, now)
        .unwrap_err();
    assert!(matches!(err, BridgeError::UnverifiedPeer { .. }));
    assert!(!b.event.is_live(token));
}

#[test]
fn bridged_away_token_cannot_be_resubmitted() {
    let (mut a, _) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);
    let token = a.event.claim(&holder(), now).unwrap();
    let fee = a.engine.estimate_fee(CHAIN_B);
    a.engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap();
    let err = a
        .engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap_err();
    assert!(matches!(err, BridgeError::TokenNotBridgeable { .. }));
}

#[test]
fn unobserved_mint_surfaces_as_stalled() {
    let (mut a, _) = two_chains();
    let mut channel = LocalChannel::new();
    let now = Timestamp::new(1_000);
    let token = a.event.claim(&holder(), now).unwrap();
    let fee = a.engine.estimate_fee(CHAIN_B);
    let correlation = a
        .engine
        .bridge_to_chain(
            &a.routes,
            &mut a.event,
            &mut channel,
            &holder(),
            token,
            CHAIN_B,
            fee,
            now,
        )
        .unwrap();

    // Within the window: in flight, not stalled.
    assert!(a.engine.check_stalled(now.plus_secs(60)).is_empty());
    a.engine.require_progress(correlation, now.plus_secs(60)).unwrap();

    // Past the window: stalled, but the token stays BridgedAway — no
    // rollback.
    let late = now.plus_secs(2 * 24 * 3600);
    assert_eq!(a.engine.check_stalled(late), vec![correlation]);
    let err = a.engine.require_progress(correlation, late).unwrap_err();
    assert!(matches!(err, BridgeError::TransferStalled(_)));
    assert_eq!(
        a.event.bridge_state(token).unwrap(),
        TokenBridgeState::BridgedAway
    );
}

proptest! {
    /// However many times the channel redelivers, the destination mints
    /// exactly once and the token is live on exactly one chain at every
    /// step.
    #[test]
    fn at_least_once_delivery_never_double_mints(redeliveries in 1usize..6) {
        let (mut a, mut b) = two_chains();
        let mut channel = LocalChannel::new();
        let now = Timestamp::new(1_000);

        let token = a.event.claim(&holder(), now).unwrap();
        prop_assert!(a.event.is_live(token) && !b.event.is_live(token));

        let fee = a.engine.estimate_fee(CHAIN_B);
        a.engine
            .bridge_to_chain(&a.routes, &mut a.event, &mut channel, &holder(), token, CHAIN_B, fee, now)
            .unwrap();
        prop_assert!(!a.event.is_live(token) && !b.event.is_live(token));

        let msg = channel.drain().remove(0);
        let mut mints = 0;
        for _ in 0..redeliveries {
            match b.engine.handle_inbound(&b.routes, &mut b.event, &msg, now).unwrap() {
                InboundOutcome::Minted { .. } => mints += 1,
                InboundOutcome::AlreadyProcessed => {}
            }
            prop_assert!(!a.event.is_live(token) && b.event.is_live(token));
        }
        prop_assert_eq!(mints, 1);
    }
}
