//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which Tessera network a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Default RPC port for this network.
    pub fn default_rpc_port(&self) -> u16 {
        match self {
            Self::Live => 8188,
            Self::Test => 18188,
            Self::Dev => 28188,
        }
    }

    /// Human-readable name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Parse from the human-readable name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "live" => Some(Self::Live),
            "test" => Some(Self::Test),
            "dev" => Some(Self::Dev),
            _ => None,
        }
    }
}
