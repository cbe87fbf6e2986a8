//! Exercise slots and their per-note lifecycle.

use nl_theory::{Clef, Note};

/// Lifecycle of one exercise slot.
///
/// `Pending → Active → { Warning → (Correct | Error) } | Correct`.
/// `Correct` and `Error` are terminal for the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteStatus {
    /// Not yet reached.
    Pending,
    /// Awaiting the learner's answer.
    Active,
    /// One wrong attempt made; a retry is still allowed.
    Warning,
    /// Resolved wrong after the final attempt.
    Error,
    /// Resolved right.
    Correct,
}

impl NoteStatus {
    /// True once the slot can no longer accept answers.
    pub fn is_resolved(self) -> bool {
        matches!(self, NoteStatus::Correct | NoteStatus::Error)
    }

    /// True while the slot accepts answers.
    pub fn awaits_answer(self) -> bool {
        matches!(self, NoteStatus::Active | NoteStatus::Warning)
    }
}

/// One slot in a session: a note, the clef it is drawn under, and the
/// answer-tracking state. Created at session start, mutated only by
/// the session state machine.
#[derive(Clone, Debug)]
pub struct ExerciseNote {
    pub note: Note,
    pub clef: Clef,
    pub status: NoteStatus,
    pub attempts: u8,
    /// Whether the syllable label is currently visible.
    pub show_label: bool,
}
