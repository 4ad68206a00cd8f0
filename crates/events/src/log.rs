//! Append-only event log.
//!
//! The log is the durable trace of everything a component announced. Each
//! append is assigned the next sequence number and then handed to live
//! subscribers. Both happen under one lock, so subscribers observe records in
//! sequence order.
//!
//! Appending cannot fail. A poisoned lock is recovered: no critical section
//! below can leave the vector half-written.

use std::sync::{Mutex, MutexGuard, PoisonError};

use roleproxy_core::Address;

use crate::fanout::{Fanout, Subscription};
use crate::{Event, EventRecord};

/// Shared, internally synchronized record log. Wrap in `Arc` to share it
/// between a factory and the adapters it deploys.
#[derive(Debug)]
pub struct EventLog<E> {
    records: Mutex<Vec<EventRecord<E>>>,
    fanout: Fanout<EventRecord<E>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fanout: Fanout::default(),
        }
    }
}

impl<E> EventLog<E> {
    fn lock(&self) -> MutexGuard<'_, Vec<EventRecord<E>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Event> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `payload` as emitted by `emitter` and deliver it to subscribers.
    pub fn append(&self, emitter: Address, payload: E) -> EventRecord<E> {
        let mut records = self.lock();

        let sequence_number = records.len() as u64 + 1;
        let record = EventRecord::new(emitter, sequence_number, payload);
        records.push(record.clone());
        let delivered = self.fanout.deliver(&record);

        tracing::trace!(
            emitter = %emitter,
            sequence_number,
            event_type = record.event_type(),
            delivered,
            "event appended"
        );

        record
    }

    /// Subscribe to records appended from now on.
    pub fn subscribe(&self) -> Subscription<EventRecord<E>> {
        // Under the record lock so no append slips between snapshot and subscribe.
        let _records = self.lock();
        self.fanout.subscribe()
    }

    /// Snapshot of every record, in sequence order.
    pub fn records(&self) -> Vec<EventRecord<E>> {
        self.lock().clone()
    }

    /// Records with a sequence number greater than `after`.
    pub fn records_since(&self, after: u64) -> Vec<EventRecord<E>> {
        self.lock()
            .iter()
            .filter(|r| r.sequence_number() > after)
            .cloned()
            .collect()
    }

    /// Records produced by `emitter`, in sequence order.
    pub fn records_from(&self, emitter: Address) -> Vec<EventRecord<E>> {
        self.lock()
            .iter()
            .filter(|r| r.emitter() == emitter)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
