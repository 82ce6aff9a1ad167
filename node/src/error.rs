//! Node-level errors.

use tessera_bridge::BridgeError;
use tessera_heritage::HeritageError;
use tessera_identity::IdentityError;
use tessera_messages::MessageError;
use tessera_routes::RouteError;
use tessera_token::TokenError;
use tessera_types::{ErrorKind, EventId, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Heritage(#[from] HeritageError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("no token event {0} on this chain")]
    UnknownEvent(EventId),

    #[error("wallet {0} is not linked to any identity")]
    UnknownWallet(WalletAddress),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeError {
    /// Protocol taxonomy of this error, when it is a protocol error.
    /// `Config` and `Io` are operational failures and have no kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Identity(e) => Some(e.kind()),
            Self::Heritage(e) => Some(e.kind()),
            Self::Token(e) => Some(e.kind()),
            Self::Route(e) => Some(e.kind()),
            Self::Bridge(e) => Some(e.kind()),
            Self::Message(e) => Some(e.kind()),
            Self::UnknownEvent(_) | Self::UnknownWallet(_) => Some(ErrorKind::Validation),
            Self::Config(_) | Self::Io(_) => None,
        }
    }
}
