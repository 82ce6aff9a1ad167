//! Identity registry errors.

use tessera_types::{ErrorKind, IdentityId, Timestamp, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity {0} not found")]
    UnknownIdentity(IdentityId),

    #[error("wallet {0} is not linked to any identity")]
    WalletNotLinked(WalletAddress),

    #[error("wallet {0} is not linked to this identity")]
    WalletNotMember(WalletAddress),

    #[error("wallet {0} has already been linked to an identity")]
    WalletAlreadyLinked(WalletAddress),

    #[error("wallet address {0} is malformed or has a bad checksum")]
    InvalidAddress(WalletAddress),

    #[error("signature from {0} does not verify")]
    InvalidSignature(WalletAddress),

    #[error("a wallet cannot report its own compromise")]
    SelfReport,

    #[error("reporter {reporter} does not belong to the same identity as {wallet}")]
    ReporterNotMember {
        reporter: WalletAddress,
        wallet: WalletAddress,
    },

    #[error("wallet {0} is compromised")]
    WalletCompromised(WalletAddress),

    #[error("wallet {0} already has an active compromise report")]
    AlreadyReported(WalletAddress),

    #[error("wallet {0} has no active compromise report")]
    NoActiveCompromise(WalletAddress),

    #[error("compromise of {0} is already finalized")]
    AlreadyFinalized(WalletAddress),

    #[error("dispute window for {wallet} is open until {deadline}")]
    DisputeWindowOpen {
        wallet: WalletAddress,
        deadline: Timestamp,
    },

    #[error("primary change cooldown active until {until}")]
    PrimaryCooldown { until: Timestamp },
}

impl IdentityError {
    /// Map onto the protocol-wide error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownIdentity(_)
            | Self::WalletNotLinked(_)
            | Self::WalletNotMember(_)
            | Self::WalletAlreadyLinked(_)
            | Self::InvalidAddress(_)
            | Self::InvalidSignature(_) => ErrorKind::Validation,
            Self::SelfReport | Self::ReporterNotMember { .. } => ErrorKind::Authorization,
            Self::WalletCompromised(_)
            | Self::AlreadyReported(_)
            | Self::NoActiveCompromise(_)
            | Self::AlreadyFinalized(_)
            | Self::DisputeWindowOpen { .. }
            | Self::PrimaryCooldown { .. } => ErrorKind::State,
        }
    }
}
