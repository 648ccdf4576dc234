//! Flyerscan Review Library
//!
//! Cursor-based review of extracted event drafts: an operator pages through
//! the drafts a batch produced, edits fields in place, and approves or
//! discards each one. Approved drafts are handed to the event-creation
//! collaborator; the queue draining signals the end of the review session.

pub mod queue;
pub mod session;

pub use queue::{Direction, DraftEdit, ReviewError, ReviewQueue};
pub use session::{EventSink, NoOpEventSink, ReviewSession, SessionEvent};
