//! Bridge transfer protocol.
//!
//! Moves a claimable token between chains without double-existence:
//!
//! 1. the owner locks the token on its origin chain,
//! 2. `bridge_to_chain` emits a correlated mint message and marks the
//!    token BridgedAway once the message is accepted for delivery (never
//!    waiting for remote confirmation),
//! 3. the destination chain verifies the message against its route
//!    registry and mints idempotently, keyed by correlation id.
//!
//! The channel is at-least-once with unbounded latency; replays mint
//! nothing and transfers that never complete are surfaced as stalled,
//! never rolled back.

pub mod channel;
pub mod engine;
pub mod error;
pub mod fees;
pub mod transfer;

pub use channel::{BridgeChannel, LocalChannel, SharedLocalChannel};
pub use engine::{BridgeEngine, InboundOutcome};
pub use error::BridgeError;
pub use fees::FeeSchedule;
pub use transfer::BridgeTransfer;
