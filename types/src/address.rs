//! Wallet address type with `tsra_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Tessera wallet address, always prefixed with `tsra_`.
///
/// Derived from the wallet's public key via Blake2b hashing + base32
/// encoding (see `tessera-crypto`). Addresses identify wallets across
/// every chain the protocol runs on; the encoding is chain-agnostic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all Tessera wallet addresses.
    pub const PREFIX: &'static str = "tsra_";

    /// Create a new wallet address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `tsra_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with tsra_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed (prefix + non-empty body).
    ///
    /// Checksum validation requires `tessera-crypto::validate_address`.
    pub fn is_well_formed(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
