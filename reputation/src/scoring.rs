//! Pluggable scoring of activity observations.

use serde::{Deserialize, Serialize};
use tessera_types::Timestamp;

/// Category of an observed wallet activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// An on-chain transaction from the wallet.
    Transaction,
    /// A token-event claim.
    EventClaim,
    /// An outbound cross-chain transfer.
    BridgeTransfer,
    /// An endorsement of another wallet.
    Endorsement,
}

/// A single observed activity, as reported by the external observation feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityObservation {
    pub kind: ActivityKind,
    /// When the activity happened on its chain, not when it was reported.
    /// The freeze cutoff compares against this.
    pub observed_at: Timestamp,
}

/// Converts an observation into score points.
///
/// The production experience/diversity/activity weighting is configured at
/// deployment time by swapping the model; the ledger never hardcodes it.
pub trait ScoringModel {
    fn score(&self, observation: &ActivityObservation) -> u64;
}

/// Flat per-activity model: every observation is worth the same number of
/// points. The default for tests and development networks.
#[derive(Clone, Debug)]
pub struct ActivityCountModel {
    pub points_per_activity: u64,
}

impl Default for ActivityCountModel {
    fn default() -> Self {
        Self {
            points_per_activity: 1,
        }
    }
}

impl ScoringModel for ActivityCountModel {
    fn score(&self, _observation: &ActivityObservation) -> u64 {
        self.points_per_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_model_ignores_kind() {
        let model = ActivityCountModel {
            points_per_activity: 3,
        };
        let tx = ActivityObservation {
            kind: ActivityKind::Transaction,
            observed_at: Timestamp::new(10),
        };
        let claim = ActivityObservation {
            kind: ActivityKind::EventClaim,
            observed_at: Timestamp::new(20),
        };
        assert_eq!(model.score(&tx), 3);
        assert_eq!(model.score(&claim), 3);
    }
}
