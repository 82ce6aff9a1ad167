//! The Tessera chain node.
//!
//! Each chain runs one node: a single-writer ledger wiring the identity
//! registry, reputation ledger, heritage issuer, token events, route
//! registry, and bridge engine behind atomic entry points. There is no
//! shared state across chains — only bridge messages.

pub mod chain;
pub mod config;
pub mod error;
pub mod shutdown;

pub use chain::{ChainNode, IdentitySummary};
pub use config::{DeployedContracts, DeploymentRecord, NodeConfig};
pub use error::NodeError;
pub use shutdown::ShutdownController;
