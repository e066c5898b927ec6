//! Creation handshake between a `create_window` caller and its pump thread
//!
//! Each call gets its own slot, so several creations may be in flight at
//! once. The pump side holds a `Completion`; dropping it without finishing
//! (for example when the pump thread panics) wakes the caller with
//! `FrameworkError::PumpAborted` instead of leaving it blocked.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::domain::value_objects::WindowId;
use crate::domain::FrameworkError;

type Outcome = Result<WindowId, FrameworkError>;

/// Waiting side of the handshake
pub struct Handshake {
    slot: Mutex<Option<Outcome>>,
    finished: Condvar,
}

impl Handshake {
    /// Create a handshake and the completion handle for the pump thread
    pub fn new() -> (Arc<Handshake>, Completion) {
        let handshake = Arc::new(Handshake {
            slot: Mutex::new(None),
            finished: Condvar::new(),
        });
        let completion = Completion {
            handshake: Arc::clone(&handshake),
            done: false,
        };
        (handshake, completion)
    }

    /// Block until the pump thread reports the outcome
    pub fn wait(&self) -> Outcome {
        let mut slot = self.slot.lock();
        loop {
            if let Some(outcome) = slot.take() {
                return outcome;
            }
            self.finished.wait(&mut slot);
        }
    }

    fn complete(&self, outcome: Outcome) {
        let mut slot = self.slot.lock();
        *slot = Some(outcome);
        drop(slot);
        self.finished.notify_one();
    }
}

/// Signalling side of the handshake, owned by the pump thread
pub struct Completion {
    handshake: Arc<Handshake>,
    done: bool,
}

impl Completion {
    /// Report the outcome and wake the waiting caller
    pub fn finish(mut self, outcome: Outcome) {
        self.done = true;
        self.handshake.complete(outcome);
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.done {
            self.handshake.complete(Err(FrameworkError::PumpAborted));
        }
    }
}
