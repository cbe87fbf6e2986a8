//! Headless controller for the notenleer trainer.
//!
//! Provides a unified API for sessions, progression, and note playback
//! that any frontend can share. The controller owns the session state
//! machine, the note generator, the progression store, and the audio
//! collaborator; frontends feed it answers and a millisecond clock and
//! re-render from its state snapshots.

use nl_session::{Session, SessionConfig, SessionEvent};

// Re-export common types so frontends don't need the member crates
// directly.
pub use nl_audio::{AudioError, CpalPlayer, NotePlayer, NullPlayer};
pub use nl_session::{
    ExerciseNote, NoteGenerator, NoteStatus, SessionState, DEFAULT_TOTAL_NOTES,
};
pub use nl_store::{
    FileStorage, MemStorage, ProgressionRecord, ProgressionStore, Storage, UNLOCK_THRESHOLD,
};
pub use nl_theory::{
    Clef, Difficulty, DifficultyConfig, LabelPolicy, Note, NoteName, DIFFICULTY_ORDER,
};

/// The trainer controller. Owns one live session and the progression
/// record.
///
/// Time is explicit: every operation takes the caller's millisecond
/// clock, and the caller pumps [`Trainer::tick`] so scheduled
/// transitions (advance delays, note playback) fire.
pub struct Trainer<S: Storage, P: NotePlayer> {
    session: Session,
    generator: NoteGenerator,
    store: ProgressionStore<S>,
    player: P,
    audio_ready: bool,
    level_unlocked: bool,
}

impl<S: Storage, P: NotePlayer> Trainer<S, P> {
    pub fn new(store: ProgressionStore<S>, player: P) -> Self {
        Self::with_generator(store, player, NoteGenerator::from_entropy())
    }

    /// Controller with a caller-supplied generator (seeded in tests).
    pub fn with_generator(
        store: ProgressionStore<S>,
        player: P,
        generator: NoteGenerator,
    ) -> Self {
        Self {
            session: Session::new(),
            generator,
            store,
            player,
            audio_ready: false,
            level_unlocked: false,
        }
    }

    // --- Session control ---

    /// Start a session with explicit, immutable inputs. Ignored for a
    /// level the learner has not unlocked yet.
    pub fn start_session(
        &mut self,
        difficulty: Difficulty,
        clef_ratio: f64,
        total_notes: usize,
        now_ms: u64,
    ) {
        if !self.store.is_unlocked(difficulty) {
            log::debug!("refusing locked level {}", difficulty);
            return;
        }
        self.level_unlocked = false;
        if difficulty.config().audio_enabled {
            self.ensure_audio();
        }
        let config = SessionConfig::new(difficulty, clef_ratio).with_total_notes(total_notes);
        let events = self.session.start(config, &mut self.generator, now_ms);
        self.handle_events(events);
    }

    /// Forward the learner's answer to the session (no-op outside an
    /// active slot).
    pub fn submit_answer(&mut self, answer: NoteName, now_ms: u64) {
        self.session.submit_answer(answer, now_ms);
    }

    /// Learner-initiated repeat of the current note.
    pub fn replay_current_note(&mut self) {
        if let Some(event) = self.session.replay_current() {
            self.handle_event(event);
        }
    }

    /// Abandon the live session without committing its score.
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.level_unlocked = false;
    }

    /// Fire due transitions. Call this regularly from the frontend
    /// loop with the same clock passed to the other operations.
    pub fn tick(&mut self, now_ms: u64) {
        let events = self.session.tick(now_ms);
        self.handle_events(events);
    }

    // --- State for the presentation layer ---

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Whether the most recently completed session unlocked the next
    /// level. Cleared when a new session starts.
    pub fn level_unlocked(&self) -> bool {
        self.level_unlocked
    }

    // --- Progression passthrough ---

    pub fn score(&self, difficulty: Difficulty) -> u32 {
        self.store.score(difficulty)
    }

    pub fn is_unlocked(&self, difficulty: Difficulty) -> bool {
        self.store.is_unlocked(difficulty)
    }

    pub fn progress_percent(&self, difficulty: Difficulty) -> u8 {
        self.store.progress_percent(difficulty)
    }

    /// Zero all progression. Explicit user action only.
    pub fn reset_progress(&mut self) {
        self.store.reset();
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    // --- Internals ---

    /// Idempotent audio bring-up; failure degrades to a silent
    /// session.
    fn ensure_audio(&mut self) {
        if self.audio_ready {
            return;
        }
        match self.player.initialize() {
            Ok(()) => self.audio_ready = true,
            Err(e) => log::warn!("audio unavailable, continuing silent: {}", e),
        }
    }

    fn handle_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PlayNote(midi_note) => self.player.play(midi_note),
            SessionEvent::Completed { score } => {
                // Commit first, then expose the unlock: the flag must
                // never report an unlock the store hasn't applied.
                let difficulty = self.session.state().difficulty;
                self.level_unlocked = self.store.add_score(difficulty, score);
            }
        }
    }
}

impl<S: Storage, P: NotePlayer> Drop for Trainer<S, P> {
    fn drop(&mut self) {
        self.player.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_session::MAX_ATTEMPTS;
    use nl_store::STORAGE_KEY;

    fn trainer() -> Trainer<MemStorage, NullPlayer> {
        trainer_with_storage(MemStorage::new())
    }

    fn trainer_with_storage(storage: MemStorage) -> Trainer<MemStorage, NullPlayer> {
        Trainer::with_generator(
            ProgressionStore::load(storage),
            NullPlayer::new(),
            NoteGenerator::from_seed(11),
        )
    }

    fn answer_current_correctly(trainer: &mut Trainer<MemStorage, NullPlayer>, now: u64) {
        let name = trainer.state().current_note().unwrap().note.name;
        trainer.submit_answer(name, now);
    }

    fn complete_session(
        trainer: &mut Trainer<MemStorage, NullPlayer>,
        total: usize,
        mut now: u64,
    ) -> u64 {
        for _ in 0..total {
            answer_current_correctly(trainer, now);
            now += 1_000;
            trainer.tick(now);
        }
        now
    }

    #[test]
    fn completed_session_commits_its_score() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 3, 0);
        complete_session(&mut t, 3, 1_000);

        assert!(t.state().is_complete);
        assert_eq!(t.score(Difficulty::Easy), 3);
        assert!(!t.level_unlocked());
    }

    #[test]
    fn commit_happens_once_per_session() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 2, 0);
        let now = complete_session(&mut t, 2, 1_000);
        // Extra ticks after completion must not re-commit.
        t.tick(now + 5_000);
        t.tick(now + 10_000);
        assert_eq!(t.score(Difficulty::Easy), 2);
    }

    #[test]
    fn unlock_is_reported_when_the_commit_crosses_the_threshold() {
        let storage = MemStorage::with_entry(STORAGE_KEY, r#"{"easy": 48}"#);
        let mut t = trainer_with_storage(storage);
        assert!(!t.is_unlocked(Difficulty::LessEasy));

        t.start_session(Difficulty::Easy, 1.0, 3, 0);
        complete_session(&mut t, 3, 1_000);

        assert!(t.level_unlocked());
        assert!(t.is_unlocked(Difficulty::LessEasy));
        assert_eq!(t.score(Difficulty::Easy), 51);
    }

    #[test]
    fn locked_levels_cannot_be_started() {
        let mut t = trainer();
        t.start_session(Difficulty::Expert, 0.5, 3, 0);
        assert!(!t.state().is_active);
    }

    #[test]
    fn playback_reaches_the_player_on_audible_levels() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 3, 0);
        t.tick(500); // first-note delay
        let expected = t.state().notes[0].note.midi_note;
        assert_eq!(t.player().played, vec![expected]);
    }

    #[test]
    fn silent_levels_never_touch_the_player() {
        let storage = MemStorage::with_entry(
            STORAGE_KEY,
            r#"{"easy": 50, "lessEasy": 50, "medium": 50, "hard": 50}"#,
        );
        let mut t = trainer_with_storage(storage);
        t.start_session(Difficulty::Expert, 0.5, 2, 0);
        assert!(t.state().is_active);

        complete_session(&mut t, 2, 1_000);
        assert!(t.player().played.is_empty());
    }

    #[test]
    fn replay_plays_the_current_note_immediately() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 3, 0);
        let expected = t.state().notes[0].note.midi_note;
        t.replay_current_note();
        assert_eq!(t.player().played, vec![expected]);
    }

    #[test]
    fn reset_session_discards_the_score() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 3, 0);
        answer_current_correctly(&mut t, 0);
        t.reset_session();
        t.tick(10_000);

        assert!(!t.state().is_active);
        assert_eq!(t.score(Difficulty::Easy), 0);
    }

    #[test]
    fn errors_do_not_reduce_the_committed_score() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 2, 0);

        // Miss the first slot twice, then answer the second correctly.
        let mut now = 0;
        let right = t.state().current_note().unwrap().note.name;
        let wrong = nl_theory::NoteName::ALL
            .into_iter()
            .find(|n| *n != right)
            .unwrap();
        for _ in 0..MAX_ATTEMPTS {
            t.submit_answer(wrong, now);
            now += 50;
        }
        now += 1_000;
        t.tick(now);
        answer_current_correctly(&mut t, now);
        t.tick(now + 1_000);

        assert!(t.state().is_complete);
        assert_eq!(t.state().score, 1);
        assert_eq!(t.score(Difficulty::Easy), 1);
    }

    #[test]
    fn zero_score_session_commits_nothing() {
        let mut t = trainer();
        t.start_session(Difficulty::Easy, 1.0, 1, 0);

        let right = t.state().current_note().unwrap().note.name;
        let wrong = nl_theory::NoteName::ALL
            .into_iter()
            .find(|n| *n != right)
            .unwrap();
        t.submit_answer(wrong, 0);
        t.submit_answer(wrong, 50);
        t.tick(5_000);

        assert!(t.state().is_complete);
        assert_eq!(t.score(Difficulty::Easy), 0);
        assert!(!t.level_unlocked());
    }

    #[test]
    fn starting_a_new_session_clears_the_unlock_flag() {
        let storage = MemStorage::with_entry(STORAGE_KEY, r#"{"easy": 49}"#);
        let mut t = trainer_with_storage(storage);
        t.start_session(Difficulty::Easy, 1.0, 1, 0);
        complete_session(&mut t, 1, 1_000);
        assert!(t.level_unlocked());

        t.start_session(Difficulty::Easy, 1.0, 1, 50_000);
        assert!(!t.level_unlocked());
    }
}
