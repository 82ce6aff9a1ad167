//! The token event ledger for one chain.

use std::collections::{HashMap, HashSet};

use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use tessera_types::{EventId, Timestamp, TokenBridgeState, TokenId, WalletAddress};

/// One claimable token event on one chain.
///
/// `claimed_count` only ever grows and never exceeds `max_supply`;
/// `has_claimed` is monotone. Tokens minted through the bridge do not
/// consume claim supply — they were claimed on their origin chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenEvent {
    pub event_id: EventId,
    pub owner: WalletAddress,
    pub max_supply: u64,
    pub claimed_count: u64,
    has_claimed: HashSet<WalletAddress>,
    /// End of the claim window; `None` means no expiry.
    pub expiry: Option<Timestamp>,
    pub paused: bool,
    /// The bridge contract allowed to mint inbound tokens. Locking and
    /// minting both require this to be configured.
    pub bridge_contract: Option<WalletAddress>,
    owners: HashMap<TokenId, WalletAddress>,
    bridge_states: HashMap<TokenId, TokenBridgeState>,
    next_token: u64,
}

impl TokenEvent {
    pub fn new(
        event_id: EventId,
        owner: WalletAddress,
        max_supply: u64,
        expiry: Option<Timestamp>,
    ) -> Self {
        Self {
            event_id,
            owner,
            max_supply,
            claimed_count: 0,
            has_claimed: HashSet::new(),
            expiry,
            paused: false,
            bridge_contract: None,
            owners: HashMap::new(),
            bridge_states: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn remaining_supply(&self) -> u64 {
        self.max_supply - self.claimed_count
    }

    pub fn has_claimed(&self, wallet: &WalletAddress) -> bool {
        self.has_claimed.contains(wallet)
    }

    pub fn owner_of(&self, token: TokenId) -> Option<&WalletAddress> {
        self.owners.get(&token)
    }

    pub fn bridge_state(&self, token: TokenId) -> Result<TokenBridgeState, TokenError> {
        if !self.owners.contains_key(&token) {
            return Err(TokenError::UnknownToken(token));
        }
        Ok(self
            .bridge_states
            .get(&token)
            .copied()
            .unwrap_or_default())
    }

    /// Whether the token is live (owned and not bridged away) here.
    pub fn is_live(&self, token: TokenId) -> bool {
        self.owners.contains_key(&token)
            && self
                .bridge_states
                .get(&token)
                .copied()
                .unwrap_or_default()
                .is_live()
    }

    /// Claim one token for `to`.
    pub fn claim(&mut self, to: &WalletAddress, now: Timestamp) -> Result<TokenId, TokenError> {
        if self.paused {
            return Err(TokenError::Paused);
        }
        if let Some(expiry) = self.expiry {
            if expiry.is_past(now) {
                return Err(TokenError::Expired(expiry));
            }
        }
        if self.claimed_count >= self.max_supply {
            return Err(TokenError::SoldOut {
                max_supply: self.max_supply,
            });
        }
        if self.has_claimed.contains(to) {
            return Err(TokenError::AlreadyClaimed(to.clone()));
        }

        let token = TokenId::new(self.next_token);
        self.next_token += 1;
        self.owners.insert(token, to.clone());
        self.bridge_states.insert(token, TokenBridgeState::Unlocked);
        self.has_claimed.insert(to.clone());
        self.claimed_count += 1;
        Ok(token)
    }

    /// Pause or unpause claiming. Owner only.
    pub fn set_paused(&mut self, caller: &WalletAddress, paused: bool) -> Result<(), TokenError> {
        if caller != &self.owner {
            return Err(TokenError::NotEventOwner(caller.clone()));
        }
        self.paused = paused;
        Ok(())
    }

    /// Configure the bridge contract allowed to mint inbound. Owner only.
    pub fn set_bridge_contract(
        &mut self,
        caller: &WalletAddress,
        bridge: WalletAddress,
    ) -> Result<(), TokenError> {
        if caller != &self.owner {
            return Err(TokenError::NotEventOwner(caller.clone()));
        }
        self.bridge_contract = Some(bridge);
        Ok(())
    }

    /// Lock a token pending an outbound bridge transfer.
    pub fn lock_for_bridge(
        &mut self,
        caller: &WalletAddress,
        token: TokenId,
    ) -> Result<(), TokenError> {
        if self.bridge_contract.is_none() {
            return Err(TokenError::BridgeNotConfigured);
        }
        let owner = self
            .owners
            .get(&token)
            .ok_or(TokenError::UnknownToken(token))?;
        if owner != caller {
            return Err(TokenError::NotTokenOwner {
                token,
                caller: caller.clone(),
            });
        }
        let state = self.bridge_state(token)?;
        if state != TokenBridgeState::Unlocked {
            return Err(TokenError::NotUnlocked { token, state });
        }
        self.bridge_states
            .insert(token, TokenBridgeState::LockedPendingBridge);
        Ok(())
    }

    /// Transition a locked token to BridgedAway, removing it from the live
    /// set on this chain. Called by the bridge engine once the outbound
    /// message is accepted for delivery. Terminal: there is no unlock.
    pub fn mark_bridged_away(&mut self, token: TokenId) -> Result<(), TokenError> {
        let state = self.bridge_state(token)?;
        if state != TokenBridgeState::LockedPendingBridge {
            return Err(TokenError::NotLocked { token, state });
        }
        self.bridge_states
            .insert(token, TokenBridgeState::BridgedAway);
        Ok(())
    }

    /// Mint a token arriving over the bridge. Only the configured bridge
    /// contract may call this.
    ///
    /// Correlation-id replay filtering happens in the bridge engine; this
    /// hook still refuses to overwrite a token that already exists here.
    pub fn mint_from_bridge(
        &mut self,
        caller: &WalletAddress,
        to: &WalletAddress,
        token: TokenId,
    ) -> Result<(), TokenError> {
        match &self.bridge_contract {
            Some(bridge) if bridge == caller => {}
            _ => return Err(TokenError::NotBridge(caller.clone())),
        }
        if self.owners.contains_key(&token) {
            return Err(TokenError::TokenAlreadyPresent(token));
        }
        self.owners.insert(token, to.clone());
        self.bridge_states.insert(token, TokenBridgeState::Unlocked);
        // Keep future local claims clear of inbound token ids.
        self.next_token = self.next_token.max(token.as_u64() + 1);
        Ok(())
    }
}
