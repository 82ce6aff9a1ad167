//! Token event errors.

use tessera_types::{ErrorKind, Timestamp, TokenBridgeState, TokenId, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("event is paused")]
    Paused,

    #[error("claim window closed at {0}")]
    Expired(Timestamp),

    #[error("event is sold out ({max_supply} claimed)")]
    SoldOut { max_supply: u64 },

    #[error("wallet {0} has already claimed")]
    AlreadyClaimed(WalletAddress),

    #[error("token {0} does not exist on this chain")]
    UnknownToken(TokenId),

    #[error("caller {0} is not the event owner")]
    NotEventOwner(WalletAddress),

    #[error("caller {caller} does not own token {token}")]
    NotTokenOwner {
        token: TokenId,
        caller: WalletAddress,
    },

    #[error("token {token} is {state:?}, expected Unlocked")]
    NotUnlocked {
        token: TokenId,
        state: TokenBridgeState,
    },

    #[error("token {token} is {state:?}, expected LockedPendingBridge")]
    NotLocked {
        token: TokenId,
        state: TokenBridgeState,
    },

    #[error("no bridge contract configured for this event")]
    BridgeNotConfigured,

    #[error("caller {0} is not the configured bridge contract")]
    NotBridge(WalletAddress),

    #[error("token {0} already exists on this chain")]
    TokenAlreadyPresent(TokenId),
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Paused
            | Self::Expired(_)
            | Self::SoldOut { .. }
            | Self::AlreadyClaimed(_)
            | Self::NotUnlocked { .. }
            | Self::NotLocked { .. }
            | Self::TokenAlreadyPresent(_) => ErrorKind::State,
            Self::UnknownToken(_) | Self::BridgeNotConfigured => ErrorKind::Validation,
            Self::NotEventOwner(_) | Self::NotTokenOwner { .. } | Self::NotBridge(_) => {
                ErrorKind::Authorization
            }
        }
    }
}
