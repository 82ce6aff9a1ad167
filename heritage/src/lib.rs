//! Heritage badge issuer.
//!
//! When a compromise report finalizes, the badges the excluded wallet had
//! earned are re-issued as unclaimed heritage badges on its identity. Any
//! active, non-compromised wallet of the same identity can then claim each
//! badge exactly once — history survives the wallet, not the key.

pub mod badge;
pub mod error;
pub mod issuer;

pub use badge::{BadgeFeed, BadgeKind, HeritageBadge, StaticBadgeFeed};
pub use error::HeritageError;
pub use issuer::HeritageIssuer;
