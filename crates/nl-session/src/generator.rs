//! Random note-sequence generation.

use nl_theory::{Clef, Difficulty, Note};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Bound on resampling when a draw repeats the previous note's pitch.
/// The final draw is accepted regardless: a soft fairness rule, never
/// a blocking loop.
pub const MAX_RESAMPLES: u32 = 10;

/// Draws (note, clef) pairs for a session.
///
/// The clef comes from one weighted coin flip per note (`Sol` with
/// probability `clef_ratio`), the staff position uniformly from the
/// difficulty's configured window.
pub struct NoteGenerator {
    rng: StdRng,
}

impl NoteGenerator {
    /// Entropy-seeded generator for normal play.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Fixed-seed generator for deterministic tests.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// One weighted clef draw. `clef_ratio` 1.0 always yields `Sol`,
    /// 0.0 always `Fa`.
    pub fn random_clef(&mut self, clef_ratio: f64) -> Clef {
        if self.rng.gen::<f64>() < clef_ratio {
            Clef::Sol
        } else {
            Clef::Fa
        }
    }

    /// One random note within the difficulty's position window.
    pub fn random_note(&mut self, difficulty: Difficulty, clef_ratio: f64) -> (Note, Clef) {
        let clef = self.random_clef(clef_ratio);
        let (min, max) = difficulty.config().position_range;
        let position = self.rng.gen_range(min..=max);
        (Note::at_position(position, clef), clef)
    }

    /// A sequence of exactly `count` notes, resampling up to
    /// [`MAX_RESAMPLES`] times when a draw repeats the preceding
    /// note's MIDI pitch.
    pub fn sequence(
        &mut self,
        count: usize,
        difficulty: Difficulty,
        clef_ratio: f64,
    ) -> Vec<(Note, Clef)> {
        let mut sequence = Vec::with_capacity(count);
        let mut last_midi: Option<u8> = None;

        for _ in 0..count {
            let mut draw = self.random_note(difficulty, clef_ratio);
            let mut attempt = 1;
            while attempt < MAX_RESAMPLES && last_midi == Some(draw.0.midi_note) {
                draw = self.random_note(difficulty, clef_ratio);
                attempt += 1;
            }
            last_midi = Some(draw.0.midi_note);
            sequence.push(draw);
        }

        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_has_exact_length() {
        let mut gen = NoteGenerator::from_seed(1);
        for count in [0, 1, 3, 10, 100] {
            let seq = gen.sequence(count, Difficulty::Easy, 0.5);
            assert_eq!(seq.len(), count);
        }
    }

    #[test]
    fn ratio_one_is_all_treble() {
        let mut gen = NoteGenerator::from_seed(2);
        let seq = gen.sequence(200, Difficulty::Medium, 1.0);
        assert!(seq.iter().all(|(_, clef)| *clef == Clef::Sol));
    }

    #[test]
    fn ratio_zero_is_all_bass() {
        let mut gen = NoteGenerator::from_seed(3);
        let seq = gen.sequence(200, Difficulty::Medium, 0.0);
        assert!(seq.iter().all(|(_, clef)| *clef == Clef::Fa));
    }

    #[test]
    fn positions_stay_within_the_difficulty_window() {
        let mut gen = NoteGenerator::from_seed(4);
        for difficulty in nl_theory::DIFFICULTY_ORDER {
            let (min, max) = difficulty.config().position_range;
            let seq = gen.sequence(300, difficulty, 0.5);
            for (note, _) in seq {
                assert!((min..=max).contains(&note.staff_position));
            }
        }
    }

    #[test]
    fn adjacent_repeats_are_rare_under_resampling() {
        // Easy range + single clef gives only 9 distinct pitches, so
        // collisions are likely per draw; after 10 resamples a repeat
        // should almost never survive.
        let mut gen = NoteGenerator::from_seed(5);
        let seq = gen.sequence(500, Difficulty::Easy, 1.0);
        let repeats = seq
            .windows(2)
            .filter(|w| w[0].0.midi_note == w[1].0.midi_note)
            .count();
        assert!(repeats < 5, "{} adjacent repeats", repeats);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let a = NoteGenerator::from_seed(42).sequence(50, Difficulty::Hard, 0.5);
        let b = NoteGenerator::from_seed(42).sequence(50, Difficulty::Hard, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn notes_resolve_consistently() {
        let mut gen = NoteGenerator::from_seed(6);
        for (note, clef) in gen.sequence(100, Difficulty::Expert, 0.5) {
            assert_eq!(Note::at_position(note.staff_position, clef), note);
        }
    }
}
