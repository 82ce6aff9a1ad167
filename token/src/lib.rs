//! Token event — a supply-capped claimable token.
//!
//! Each event mints at most `max_supply` tokens, one claim per wallet,
//! inside an optional claim window, with an owner-controlled pause switch.
//! Tokens carry a per-chain bridge state so a token is live on exactly one
//! chain at a time: locking removes it from the transferable set before
//! any remote mint can exist.

pub mod error;
pub mod event;

pub use error::TokenError;
pub use event::TokenEvent;
