//! The exercise session state machine.
//!
//! Owns the note list for one exercise, the score, and the scheduled
//! transitions that pace the session. Callers drive it with three
//! inputs (`start`, `submit_answer`, `tick`) and perform the side
//! effects it emits as [`SessionEvent`]s (note playback, score
//! commit). Answers submitted while no slot is awaiting one are
//! silently ignored.

use nl_theory::{Difficulty, LabelPolicy, NoteName};

use crate::exercise::{ExerciseNote, NoteStatus};
use crate::generator::NoteGenerator;
use crate::schedule::{TaskAction, TaskQueue};

/// Delay before the first note of a session is played.
const FIRST_NOTE_DELAY_MS: u64 = 500;

/// Delay between a correct answer and the advance to the next slot.
const ADVANCE_AFTER_CORRECT_MS: u64 = 400;

/// Delay between a final wrong answer and the advance, slightly
/// longer so the error state registers with the learner.
const ADVANCE_AFTER_ERROR_MS: u64 = 600;

/// Delay between an advance and the new slot's playback.
const PLAY_AFTER_ADVANCE_MS: u64 = 400;

/// Answers allowed per slot before it resolves as an error.
pub const MAX_ATTEMPTS: u8 = 2;

/// Default number of notes per session.
pub const DEFAULT_TOTAL_NOTES: usize = 10;

/// Immutable inputs for one session, fixed at start.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    /// Fraction of treble-clef notes, in [0, 1].
    pub clef_ratio: f64,
    pub total_notes: usize,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty, clef_ratio: f64) -> Self {
        Self { difficulty, clef_ratio, total_notes: DEFAULT_TOTAL_NOTES }
    }

    pub fn with_total_notes(mut self, total_notes: usize) -> Self {
        self.total_notes = total_notes;
        self
    }
}

/// Snapshot of the live session, re-read by the presentation layer
/// after every mutation.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub difficulty: Difficulty,
    pub clef_ratio: f64,
    pub total_notes: usize,
    /// 0-based index of the current slot; equals `total_notes` once
    /// the session is complete.
    pub current_index: usize,
    pub score: i32,
    pub is_active: bool,
    pub is_complete: bool,
    pub notes: Vec<ExerciseNote>,
}

impl SessionState {
    fn idle() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            clef_ratio: 0.5,
            total_notes: DEFAULT_TOTAL_NOTES,
            current_index: 0,
            score: 0,
            is_active: false,
            is_complete: false,
            notes: Vec::new(),
        }
    }

    /// The slot currently awaiting an answer, if any.
    pub fn current_note(&self) -> Option<&ExerciseNote> {
        self.notes.get(self.current_index)
    }
}

/// Side effects the session asks its caller to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Request playback of a pitch (already gated on the difficulty's
    /// audio flag).
    PlayNote(u8),
    /// The session just completed with this final score.
    Completed { score: i32 },
}

/// The session state machine.
pub struct Session {
    state: SessionState,
    tasks: TaskQueue,
    /// Bumped on every start/reset; pending tasks from earlier
    /// generations are discarded when they come due.
    generation: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::idle(),
            tasks: TaskQueue::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn audio_enabled(&self) -> bool {
        self.state.difficulty.config().audio_enabled
    }

    /// Begin a fresh session. Consumes `generator` for the note
    /// sequence; `now_ms` anchors the pacing clock. Any pending
    /// transitions from a previous session are invalidated.
    ///
    /// An empty session (zero notes) completes immediately.
    pub fn start(
        &mut self,
        config: SessionConfig,
        generator: &mut NoteGenerator,
        now_ms: u64,
    ) -> Vec<SessionEvent> {
        self.generation = self.generation.wrapping_add(1);

        let sequence = generator.sequence(config.total_notes, config.difficulty, config.clef_ratio);
        let labels_from_start =
            config.difficulty.config().label_policy == LabelPolicy::Always;

        let notes: Vec<ExerciseNote> = sequence
            .into_iter()
            .enumerate()
            .map(|(i, (note, clef))| ExerciseNote {
                note,
                clef,
                status: if i == 0 { NoteStatus::Active } else { NoteStatus::Pending },
                attempts: 0,
                show_label: labels_from_start,
            })
            .collect();

        self.state = SessionState {
            difficulty: config.difficulty,
            clef_ratio: config.clef_ratio,
            total_notes: config.total_notes,
            current_index: 0,
            score: 0,
            is_active: true,
            is_complete: false,
            notes,
        };

        if self.state.notes.is_empty() {
            self.state.is_complete = true;
            log::debug!("empty session completes immediately");
            return vec![SessionEvent::Completed { score: 0 }];
        }

        if self.audio_enabled() {
            self.tasks
                .push(now_ms + FIRST_NOTE_DELAY_MS, self.generation, TaskAction::PlayCurrent);
        }
        Vec::new()
    }

    /// Abandon the live session. Pending transitions are invalidated.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = SessionState::idle();
    }

    /// Submit the learner's answer for the current slot.
    ///
    /// A no-op when the session is inactive, complete, or the current
    /// slot is already resolved (e.g. during the pre-advance delay).
    pub fn submit_answer(&mut self, answer: NoteName, now_ms: u64) {
        if !self.state.is_active || self.state.is_complete {
            return;
        }
        let index = self.state.current_index;
        let Some(slot) = self.state.notes.get_mut(index) else {
            return;
        };
        if !slot.status.awaits_answer() {
            return;
        }

        slot.attempts += 1;

        if answer == slot.note.name {
            slot.status = NoteStatus::Correct;
            self.state.score += 1;
            self.tasks.push(
                now_ms + ADVANCE_AFTER_CORRECT_MS,
                self.generation,
                TaskAction::Advance,
            );
        } else if slot.attempts >= MAX_ATTEMPTS {
            // Final attempt missed: the slot resolves as an error with
            // no score deduction.
            slot.status = NoteStatus::Error;
            self.tasks.push(
                now_ms + ADVANCE_AFTER_ERROR_MS,
                self.generation,
                TaskAction::Advance,
            );
        } else {
            slot.status = NoteStatus::Warning;
        }
    }

    /// Learner-initiated repeat of the current note's pitch.
    pub fn replay_current(&self) -> Option<SessionEvent> {
        if !self.state.is_active || self.state.is_complete || !self.audio_enabled() {
            return None;
        }
        self.state
            .current_note()
            .map(|slot| SessionEvent::PlayNote(slot.note.midi_note))
    }

    /// Fire all transitions due at `now_ms` and return the resulting
    /// effects. Call this from the frontend's event loop.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for action in self.tasks.pop_due(now_ms, self.generation) {
            match action {
                TaskAction::Advance => self.advance(now_ms, &mut events),
                TaskAction::PlayCurrent => {
                    if let Some(slot) = self.state.current_note() {
                        events.push(SessionEvent::PlayNote(slot.note.midi_note));
                    }
                }
            }
        }
        events
    }

    /// Move past the just-resolved slot: reveal its label when the
    /// difficulty says so, then either activate the next slot or
    /// complete the session.
    fn advance(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        if !self.state.is_active || self.state.is_complete {
            return;
        }
        let index = self.state.current_index;

        if self.state.difficulty.config().label_policy == LabelPolicy::AfterAnswer {
            if let Some(slot) = self.state.notes.get_mut(index) {
                slot.show_label = true;
            }
        }

        let next = index + 1;
        self.state.current_index = next;

        if next >= self.state.total_notes {
            self.state.is_complete = true;
            log::debug!(
                "session complete: {}/{} on {}",
                self.state.score,
                self.state.total_notes,
                self.state.difficulty
            );
            events.push(SessionEvent::Completed { score: self.state.score });
        } else {
            self.state.notes[next].status = NoteStatus::Active;
            if self.audio_enabled() {
                self.tasks.push(
                    now_ms + PLAY_AFTER_ADVANCE_MS,
                    self.generation,
                    TaskAction::PlayCurrent,
                );
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
