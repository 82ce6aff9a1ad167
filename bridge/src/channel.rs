//! The cross-chain delivery primitive.

use std::collections::VecDeque;

use crate::error::BridgeError;
use tessera_messages::{decode_frame, encode_frame, BridgeMintMessage};

/// At-least-once message dispatch.
///
/// `dispatch` returning `Ok` means the message was *accepted for
/// delivery* — the only commitment the protocol ever waits on. Delivery
/// itself may take arbitrarily long, repeat, and reorder across tokens.
pub trait BridgeChannel {
    fn dispatch(&mut self, message: &BridgeMintMessage) -> Result<(), BridgeError>;
}

/// In-memory channel for tests and the single-process dev loop.
///
/// Stores encoded frames so dispatch exercises the real codec. Setting
/// `deliver_twice` makes the next drain yield every message twice,
/// simulating at-least-once redelivery.
#[derive(Default)]
pub struct LocalChannel {
    frames: VecDeque<Vec<u8>>,
    pub deliver_twice: bool,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of undelivered messages.
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    /// Deliver everything queued, in order.
    pub fn drain(&mut self) -> Vec<BridgeMintMessage> {
        let mut out = Vec::new();
        while let Some(frame) = self.frames.pop_front() {
            if let Ok((msg, _)) = decode_frame::<BridgeMintMessage>(&frame) {
                if self.deliver_twice {
                    out.push(msg.clone());
                }
                out.push(msg);
            }
        }
        out
    }
}

impl BridgeChannel for LocalChannel {
    fn dispatch(&mut self, message: &BridgeMintMessage) -> Result<(), BridgeError> {
        let frame = encode_frame(message).map_err(|e| BridgeError::Channel(e.to_string()))?;
        self.frames.push_back(frame);
        Ok(())
    }
}

/// Cloneable handle over one shared [`LocalChannel`], so a node can own a
/// dispatch endpoint while the test or dev loop drains deliveries from
/// the outside.
#[derive(Clone, Default)]
pub struct SharedLocalChannel(std::sync::Arc<std::sync::Mutex<LocalChannel>>);

impl SharedLocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.0.lock().map(|ch| ch.pending()).unwrap_or(0)
    }

    pub fn drain(&self) -> Vec<BridgeMintMessage> {
        self.0.lock().map(|mut ch| ch.drain()).unwrap_or_default()
    }
}

impl BridgeChannel for SharedLocalChannel {
    fn dispatch(&mut self, message: &BridgeMintMessage) -> Result<(), BridgeError> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| BridgeError::Channel("channel lock poisoned".into()))?;
        inner.dispatch(message)
    }
}
