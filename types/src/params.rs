//! Protocol parameters shared by every node of a deployment.

use serde::{Deserialize, Serialize};

/// Tunable protocol parameters.
///
/// All durations are wall-clock seconds; every timer is evaluated lazily
/// when an operation next touches the record, never by a scheduler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Length of the compromise dispute window, from the moment a wallet is
    /// reported until the report may be finalized.
    pub dispute_window_secs: u64,

    /// Minimum interval between two successful primary-wallet changes on
    /// the same identity. Deployment-tunable.
    pub primary_cooldown_secs: u64,

    /// Flat messaging fee (raw fee units) charged for any outbound bridge
    /// transfer when the destination chain has no specific entry.
    pub bridge_base_fee: u128,

    /// Age (seconds since dispatch) after which a transfer still awaiting
    /// its remote mint is reported as stalled.
    pub transfer_stale_secs: u64,

    /// Wire protocol version stamped on every bridge message.
    pub protocol_version: u16,
}

impl ProtocolParams {
    /// Tessera mainnet defaults.
    pub fn tessera_defaults() -> Self {
        Self {
            dispute_window_secs: 30 * 24 * 3600,  // 30 days
            primary_cooldown_secs: 14 * 24 * 3600, // 14 days
            bridge_base_fee: 1_000_000,
            transfer_stale_secs: 24 * 3600, // 1 day
            protocol_version: 1,
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::tessera_defaults()
    }
}
