//! Per-wallet score state and identity-level aggregation.

use std::collections::HashMap;

use crate::scoring::{ActivityObservation, ScoringModel};
use serde::{Deserialize, Serialize};
use tessera_types::{Timestamp, WalletAddress};

/// Score bookkeeping for one wallet.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Accumulated score points.
    pub score: u64,
    /// Number of observations that counted.
    pub observations: u64,
    /// Cutoff after which activity no longer counts. Set when the wallet
    /// is reported compromised; history before the cutoff is preserved.
    pub counts_until: Option<Timestamp>,
}

impl ScoreState {
    fn accepts(&self, observed_at: Timestamp) -> bool {
        match self.counts_until {
            Some(cutoff) => observed_at < cutoff,
            None => true,
        }
    }
}

/// The reputation ledger for one chain.
///
/// Entries are created on first touch; a wallet with no recorded activity
/// has score zero. Which wallets aggregate into an identity total is the
/// identity registry's call — the ledger only sums what it is handed.
pub struct ReputationLedger {
    scores: HashMap<WalletAddress, ScoreState>,
    model: Box<dyn ScoringModel + Send + Sync>,
}

impl ReputationLedger {
    pub fn new(model: Box<dyn ScoringModel + Send + Sync>) -> Self {
        Self {
            scores: HashMap::new(),
            model,
        }
    }

    /// Record an observed activity for a wallet.
    ///
    /// Returns `false` when the observation was ignored because it falls at
    /// or after the wallet's freeze cutoff. Late-arriving activity for a
    /// frozen wallet is expected (the observation feed lags) and is not an
    /// error.
    pub fn record_activity(
        &mut self,
        wallet: &WalletAddress,
        observation: &ActivityObservation,
    ) -> bool {
        let state = self.scores.entry(wallet.clone()).or_default();
        if !state.accepts(observation.observed_at) {
            return false;
        }
        state.score = state.score.saturating_add(self.model.score(observation));
        state.observations += 1;
        true
    }

    /// Freeze a wallet's activity window at `now`.
    ///
    /// Observations at or after the cutoff are ignored from here on. An
    /// earlier existing cutoff wins: freezing is never extended forward.
    pub fn freeze_activity(&mut self, wallet: &WalletAddress, now: Timestamp) {
        let state = self.scores.entry(wallet.clone()).or_default();
        state.counts_until = Some(match state.counts_until {
            Some(existing) if existing <= now => existing,
            _ => now,
        });
    }

    /// The individual score of one wallet. Zero if never observed.
    pub fn individual_score(&self, wallet: &WalletAddress) -> u64 {
        self.scores.get(wallet).map_or(0, |s| s.score)
    }

    /// Full score state, if the wallet has one.
    pub fn score_state(&self, wallet: &WalletAddress) -> Option<&ScoreState> {
        self.scores.get(wallet)
    }

    /// Sum the individual scores of the given wallets.
    ///
    /// The caller passes the identity's linked wallets whose compromise
    /// state still counts toward score (finalized wallets excluded).
    pub fn aggregate<'a>(&self, wallets: impl IntoIterator<Item = &'a WalletAddress>) -> u64 {
        wallets
            .into_iter()
            .map(|w| self.individual_score(w))
            .fold(0u64, u64::saturating_add)
    }
}

impl Default for ReputationLedger {
    fn default() -> Self {
        Self::new(Box::<crate::scoring::ActivityCountModel>::default())
    }
}
