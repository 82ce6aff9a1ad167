//! Fundamental types for the Tessera protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, chain and record identifiers, timestamps,
//! key material, protocol parameters, and the state enums driving the
//! identity and bridge state machines.

pub mod address;
pub mod chain;
pub mod error;
pub mod ids;
pub mod keys;
pub mod network;
pub mod params;
pub mod state;
pub mod time;

pub use address::WalletAddress;
pub use chain::ChainId;
pub use error::ErrorKind;
pub use ids::{CorrelationId, EventId, IdentityId, TokenId, TxRef};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use params::ProtocolParams;
pub use state::{CompromiseState, IdentityStatus, TokenBridgeState, TransferPhase};
pub use time::Timestamp;
