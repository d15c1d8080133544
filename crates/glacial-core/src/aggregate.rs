//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An aggregate whose state is the fold of its event stream.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of committed events folded into this aggregate.
    fn version(&self) -> i64;

    /// Folds one event into the aggregate state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events produced by command handling that are not yet stored.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after persistence.
    fn clear_uncommitted_events(&mut self);
}
