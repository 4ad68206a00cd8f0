//! `roleproxy-events`: envelopes, the append-only log and live delivery of
//! observable records.

pub mod envelope;
pub mod event;
pub mod fanout;
pub mod log;

pub use envelope::EventRecord;
pub use event::Event;
pub use fanout::Subscription;
pub use log::EventLog;
