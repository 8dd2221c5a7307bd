//! Events and the subject/observer primitive that delivers them.
//!
//! # Invariants
//! - Events are immutable once constructed and are passed by reference.
//! - A subject never owns its observers; it holds weak references.
//! - An observer is registered at most once per subject.
//! - `notify` calls observers in registration order, synchronously.

mod event;
mod subject;

pub use event::{Event, EventKind};
pub use subject::{Observer, Subject};
