//! Domain reducers.
//!
//! Pure folds from the current snapshot of one entity family and an event to
//! the next snapshot. Reducers never mutate their input; they build a new
//! value and return `None` when the event has no effect, so the dispatcher
//! can skip republishing unchanged slices.

pub mod chat;
pub mod polls;
pub mod raised;
pub mod self_status;
pub mod users;
