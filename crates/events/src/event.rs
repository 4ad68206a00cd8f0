/// Payload type of an [`EventRecord`](crate::EventRecord).
///
/// Records are facts: once appended they are never edited, only superseded by
/// later records.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted name, e.g. `adapter.execution.completed`.
    fn event_type(&self) -> &'static str;

    /// Schema version of this event type's payload.
    fn version(&self) -> u32;
}
