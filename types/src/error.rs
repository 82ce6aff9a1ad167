//! Error classification shared across crates.
//!
//! Each crate defines its own error enum; `kind()` on those enums maps
//! every variant onto this four-way taxonomy so callers (and the RPC
//! layer) can react uniformly without matching on crate-specific variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a protocol error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A malformed or inconsistent input: bad signature, wallet already
    /// linked elsewhere, insufficient bridge fee, unconfigured route.
    Validation,
    /// The caller is not allowed to perform this operation: non-owner
    /// admin call, non-bridge mint, self-reported compromise.
    Authorization,
    /// The operation is not legal in the record's current state: double
    /// claim, paused/expired/sold-out event, bridging a non-Unlocked
    /// token, finalizing before the dispute deadline, badge re-claim.
    State,
    /// A remote collaborator failed to make progress: a transfer whose
    /// remote mint was never observed. Never rolled back automatically.
    ExternalDependency,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::ExternalDependency => "external-dependency",
        };
        write!(f, "{s}")
    }
}
