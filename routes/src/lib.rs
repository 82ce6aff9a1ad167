//! Bridge route registry — the per-chain directory of peer bridge
//! contract addresses.
//!
//! A single authority maintains the directory. Writes are idempotent:
//! re-setting an unchanged value is a no-op and emits nothing. An absent
//! entry is a distinct "unconfigured route" condition, never a zero
//! address.

pub mod error;
pub mod registry;

pub use error::RouteError;
pub use registry::{RouteEvent, RouteRegistry};
