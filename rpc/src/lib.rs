//! JSON RPC server for a Tessera chain node.
//!
//! Exposes the public protocol operations over HTTP:
//! - identity lifecycle (create, link, primary election, compromise
//!   reporting and finalization, lazy status reads)
//! - heritage badge claims
//! - token event claims and the owner pause switch
//! - bridge operations (route admin, fee estimate, lock, transfer,
//!   transfer status polling)
//!
//! Wall-clock time enters the protocol here: handlers stamp `now` once
//! and the engines below stay deterministic.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::RpcServer;
