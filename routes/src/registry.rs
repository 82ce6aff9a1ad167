//! The keyed route configuration store.

use std::collections::HashMap;

use crate::error::RouteError;
use tessera_types::{ChainId, WalletAddress};

/// Events emitted on effective (non-idempotent) writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteEvent {
    RouteSet {
        chain: ChainId,
        address: WalletAddress,
    },
}

/// Directory of peer bridge contract addresses, keyed by chain.
pub struct RouteRegistry {
    authority: WalletAddress,
    routes: HashMap<ChainId, WalletAddress>,
    pending_events: Vec<RouteEvent>,
}

impl RouteRegistry {
    pub fn new(authority: WalletAddress) -> Self {
        Self {
            authority,
            routes: HashMap::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn authority(&self) -> &WalletAddress {
        &self.authority
    }

    /// Set the bridge contract address for a chain. Authority only.
    ///
    /// Idempotent: writing the value already stored changes nothing and
    /// emits no event. Returns whether the write was effective.
    pub fn set_bridge_address(
        &mut self,
        caller: &WalletAddress,
        chain: ChainId,
        address: WalletAddress,
    ) -> Result<bool, RouteError> {
        if caller != &self.authority {
            return Err(RouteError::NotAuthority(caller.clone()));
        }
        if self.routes.get(&chain) == Some(&address) {
            return Ok(false);
        }
        self.routes.insert(chain, address.clone());
        self.pending_events
            .push(RouteEvent::RouteSet { chain, address });
        Ok(true)
    }

    /// The peer bridge contract for a chain, if one is configured.
    pub fn bridge_address(&self, chain: ChainId) -> Option<&WalletAddress> {
        self.routes.get(&chain)
    }

    /// Drain events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<RouteEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
