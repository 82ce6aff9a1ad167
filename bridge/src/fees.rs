//! Destination-chain messaging fee schedule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tessera_types::ChainId;

/// Fee estimates per destination chain, with a flat fallback.
///
/// Estimation is a pure read; enforcement (`fee >= estimate`) happens in
/// the engine when a transfer is submitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeeSchedule {
    base: u128,
    per_chain: HashMap<ChainId, u128>,
}

impl FeeSchedule {
    pub fn new(base: u128) -> Self {
        Self {
            base,
            per_chain: HashMap::new(),
        }
    }

    /// Override the fee for one destination chain.
    pub fn set_chain_fee(&mut self, chain: ChainId, fee: u128) {
        self.per_chain.insert(chain, fee);
    }

    /// The messaging cost estimate for a destination chain.
    pub fn estimate(&self, dest: ChainId) -> u128 {
        self.per_chain.get(&dest).copied().unwrap_or(self.base)
    }
}
