//! Note playback backends for the notenleer trainer.
//!
//! The session layer talks to a [`NotePlayer`]: initialize once, fire
//! pitches, dispose on teardown. [`CpalPlayer`] renders a decaying
//! sine tone on the default output device; [`NullPlayer`] swallows
//! everything for tests and silent levels. Audio failure is always
//! survivable; the trainer degrades to a silent session.

mod cpal_backend;
mod synth;
mod traits;

pub use cpal_backend::CpalPlayer;
pub use synth::{midi_to_hz, Voice};
pub use traits::{AudioError, NotePlayer, NullPlayer};
