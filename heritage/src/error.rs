//! Heritage issuer errors.

use crate::badge::BadgeKind;
use tessera_types::{ErrorKind, IdentityId, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeritageError {
    #[error("no badge of kind {kind} exists for {identity}")]
    UnknownBadge {
        identity: IdentityId,
        kind: BadgeKind,
    },

    #[error("badge {kind} of {identity} is already claimed")]
    AlreadyClaimed {
        identity: IdentityId,
        kind: BadgeKind,
    },

    #[error("destination wallet {0} is not an active member of this identity")]
    NotMember(WalletAddress),

    #[error("destination wallet {0} is compromised")]
    CompromisedDestination(WalletAddress),
}

impl HeritageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownBadge { .. } | Self::NotMember(_) => ErrorKind::Validation,
            Self::AlreadyClaimed { .. } | Self::CompromisedDestination(_) => ErrorKind::State,
        }
    }
}
