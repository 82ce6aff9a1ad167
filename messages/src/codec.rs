//! Length-prefixed bincode framing for bridge messages.

use crate::error::MessageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum encoded message size in bytes.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Encode a message as a 4-byte big-endian length prefix + bincode body.
pub fn encode_frame(message: &impl Serialize) -> Result<Vec<u8>, MessageError> {
    let body = bincode::serialize(message).map_err(|e| MessageError::Malformed(e.to_string()))?;
    if body.len() > MAX_MESSAGE_SIZE {
        return Err(MessageError::TooLarge {
            size: body.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode one framed message, returning it and the bytes consumed.
pub fn decode_frame<T: DeserializeOwned>(data: &[u8]) -> Result<(T, usize), MessageError> {
    if data.len() < 4 {
        return Err(MessageError::Truncated {
            expected: 4,
            available: data.len(),
        });
    }
    let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(MessageError::TooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
        });
    }
    if data.len() < 4 + len {
        return Err(MessageError::Truncated {
            expected: 4 + len,
            available: data.len(),
        });
    }
    let message = bincode::deserialize(&data[4..4 + len])
        .map_err(|e| MessageError::Malformed(e.to_string()))?;
    Ok((message, 4 + len))
}
