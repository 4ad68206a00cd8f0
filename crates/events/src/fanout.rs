//! Live delivery of appended records to in-process subscribers.
//!
//! The [`EventLog`](crate::EventLog) is the source of truth; fan-out only
//! hands copies to whoever is listening right now. Each subscriber gets its
//! own channel, and channels whose receiver was dropped are pruned on the
//! next delivery.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

/// Receiving end of a log subscription.
///
/// Sees every record appended after it was created, in sequence order.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    /// Next queued record, if any. Never blocks.
    pub fn try_recv(&self) -> Option<M> {
        self.receiver.try_recv().ok()
    }

    /// Everything queued so far.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug)]
pub(crate) struct Fanout<M> {
    senders: Mutex<Vec<Sender<M>>>,
}

impl<M> Default for Fanout<M> {
    fn default() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }
}

impl<M: Clone> Fanout<M> {
    pub(crate) fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Subscription { receiver: rx }
    }

    /// Send a copy to every live subscriber; returns how many received it.
    pub(crate) fn deliver(&self, message: &M) -> usize {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|tx| tx.send(message.clone()).is_ok());
        senders.len()
    }
}
