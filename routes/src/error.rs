//! Route registry errors.

use tessera_types::{ErrorKind, WalletAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("caller {0} is not the route authority")]
    NotAuthority(WalletAddress),
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthority(_) => ErrorKind::Authorization,
        }
    }
}
