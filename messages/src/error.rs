//! Message codec errors.

use tessera_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("frame is truncated: expected {expected} bytes, have {available}")]
    Truncated { expected: usize, available: usize },

    #[error("malformed message: {0}")]
    Malformed(String),
}

impl MessageError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
