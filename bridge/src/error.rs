//! Bridge protocol errors.

use tessera_token::TokenError;
use tessera_types::{
    ChainId, CorrelationId, ErrorKind, TokenBridgeState, TokenId, WalletAddress,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("token {token} is {state:?} and cannot be bridged")]
    TokenNotBridgeable {
        token: TokenId,
        state: TokenBridgeState,
    },

    #[error("caller {caller} does not own token {token}")]
    NotTokenOwner {
        token: TokenId,
        caller: WalletAddress,
    },

    #[error("fee {provided} is below the estimate {required}")]
    InsufficientFee { required: u128, provided: u128 },

    #[error("no bridge route configured for {0}")]
    RouteNotConfigured(ChainId),

    #[error("destination {0} is this chain")]
    SelfTransfer(ChainId),

    #[error("message addressed to {dest}, this is {local}")]
    WrongDestination { dest: ChainId, local: ChainId },

    #[error("unsupported protocol version {got}, expected {expected}")]
    UnsupportedVersion { got: u16, expected: u16 },

    #[error("message claims source bridge {claimed}, route registry disagrees")]
    UnverifiedPeer { claimed: WalletAddress },

    #[error("no transfer recorded for {0}")]
    UnknownTransfer(CorrelationId),

    #[error("transfer {0} dispatched but remote mint never observed")]
    TransferStalled(CorrelationId),

    #[error("channel rejected message: {0}")]
    Channel(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TokenNotBridgeable { .. } => ErrorKind::State,
            Self::NotTokenOwner { .. } | Self::UnverifiedPeer { .. } => ErrorKind::Authorization,
            Self::InsufficientFee { .. }
            | Self::RouteNotConfigured(_)
            | Self::SelfTransfer(_)
            | Self::WrongDestination { .. }
            | Self::UnsupportedVersion { .. }
            | Self::UnknownTransfer(_) => ErrorKind::Validation,
            Self::TransferStalled(_) | Self::Channel(_) => ErrorKind::ExternalDependency,
            Self::Token(e) => e.kind(),
        }
    }
}
