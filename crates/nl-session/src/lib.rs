//! Exercise session machinery for the notenleer trainer.
//!
//! Three pieces: a random note-sequence generator, a per-note state
//! machine with its session aggregate, and a queue of scheduled
//! transitions that stands in for UI timers. The session is pure with
//! respect to time: callers pass a millisecond clock into every
//! operation and pump [`Session::tick`] to fire due transitions.

mod exercise;
mod generator;
mod schedule;
mod session;

pub use exercise::{ExerciseNote, NoteStatus};
pub use generator::{NoteGenerator, MAX_RESAMPLES};
pub use schedule::{TaskAction, TaskQueue};
pub use session::{
    Session, SessionConfig, SessionEvent, SessionState, DEFAULT_TOTAL_NOTES, MAX_ATTEMPTS,
};
