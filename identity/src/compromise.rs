//! Compromise report records.

use serde::{Deserialize, Serialize};
use tessera_types::{Timestamp, WalletAddress};

/// An active compromise report against a linked wallet.
///
/// One active record per wallet at a time. The dispute window gives the
/// identity owner time to elect a replacement primary before finalization
/// permanently excludes the wallet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompromiseRecord {
    pub wallet: WalletAddress,
    pub reporter: WalletAddress,
    pub initiated_at: Timestamp,
    pub dispute_deadline: Timestamp,
    pub finalized: bool,
}

impl CompromiseRecord {
    pub fn new(
        wallet: WalletAddress,
        reporter: WalletAddress,
        now: Timestamp,
        dispute_window_secs: u64,
    ) -> Self {
        Self {
            wallet,
            reporter,
            initiated_at: now,
            dispute_deadline: now.plus_secs(dispute_window_secs),
            finalized: false,
        }
    }

    /// Whether the dispute window has lapsed at `now`.
    pub fn disputable_until_passed(&self, now: Timestamp) -> bool {
        self.dispute_deadline.is_past(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_window_after_initiation() {
        let r = CompromiseRecord::new(
            WalletAddress::new("tsra_victim"),
            WalletAddress::new("tsra_reporter"),
            Timestamp::new(1_000),
            30 * 24 * 3600,
        );
        assert_eq!(r.dispute_deadline.as_secs(), 1_000 + 30 * 24 * 3600);
        assert!(!r.disputable_until_passed(r.dispute_deadline));
        assert!(r.disputable_until_passed(r.dispute_deadline.plus_secs(1)));
    }
}
