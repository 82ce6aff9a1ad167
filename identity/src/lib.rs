//! Identity registry — the identity/wallet lifecycle state machine.
//!
//! An identity unifies several wallets under one non-transferable record:
//! linking requires mutual consent signatures, one linked wallet is the
//! elected primary, and any linked wallet can report another compromised,
//! opening a dispute window before the report finalizes into permanent
//! exclusion.
//!
//! Status transitions driven by deadlines (PendingPrimaryCompromise →
//! Suspended) are evaluated lazily on the next touch of the identity —
//! there is no background scheduler.

pub mod compromise;
pub mod error;
pub mod identity;
pub mod registry;

pub use compromise::CompromiseRecord;
pub use error::IdentityError;
pub use identity::{Identity, WalletLink};
pub use registry::{FinalizeOutcome, IdentityEvent, IdentityRegistry};
