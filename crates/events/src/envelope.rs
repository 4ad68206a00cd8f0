use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roleproxy_core::Address;

use crate::Event;

/// Envelope for an event, carrying the emitter and log position.
///
/// This is the unit appended to an [`EventLog`](crate::EventLog) and handed to
/// subscribers.
///
/// Notes:
/// - `emitter` is the component that produced the record (an adapter or a factory).
/// - **Append-only**: `sequence_number` increases by one per record in its log,
///   starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord<E> {
    event_id: Uuid,
    emitter: Address,
    event_type: String,
    event_version: u32,
    sequence_number: u64,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E: Event> EventRecord<E> {
    pub fn new(emitter: Address, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            emitter,
            event_type: payload.event_type().to_string(),
            event_version: payload.version(),
            sequence_number,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

impl<E> EventRecord<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn emitter(&self) -> Address {
        self.emitter
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> u32 {
        self.event_version
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Serialize> EventRecord<E> {
    /// JSON form handed to external indexers.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
