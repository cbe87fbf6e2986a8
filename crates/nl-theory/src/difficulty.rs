//! Difficulty levels and the per-level configuration table.
//!
//! All level-dependent behavior (position range, label visibility,
//! audio) lives in one table consulted through [`Difficulty::config`].
//! Components never branch on the level directly.

use core::fmt;

/// Ordered difficulty levels; the order defines unlock precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    LessEasy,
    Medium,
    Hard,
    Expert,
}

/// Unlock precedence, lowest first.
pub const DIFFICULTY_ORDER: [Difficulty; 5] = [
    Difficulty::Easy,
    Difficulty::LessEasy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Expert,
];

/// When a note's syllable label is shown to the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Visible from the moment the note appears.
    Always,
    /// Revealed when the note's slot is resolved.
    AfterAnswer,
    /// Never shown.
    Never,
}

/// Per-level configuration.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyConfig {
    /// Inclusive staff-position window notes are drawn from.
    pub position_range: (i32, i32),
    /// Label visibility for this level.
    pub label_policy: LabelPolicy,
    /// Whether notes are played back on this level.
    pub audio_enabled: bool,
}

/// One entry per level, in `DIFFICULTY_ORDER`. Ranges widen
/// monotonically with difficulty.
const CONFIGS: [DifficultyConfig; 5] = [
    DifficultyConfig {
        position_range: (-4, 4),
        label_policy: LabelPolicy::Always,
        audio_enabled: true,
    },
    DifficultyConfig {
        position_range: (-6, 6),
        label_policy: LabelPolicy::Always,
        audio_enabled: true,
    },
    DifficultyConfig {
        position_range: (-7, 7),
        label_policy: LabelPolicy::AfterAnswer,
        audio_enabled: true,
    },
    DifficultyConfig {
        position_range: (-9, 9),
        label_policy: LabelPolicy::AfterAnswer,
        audio_enabled: true,
    },
    DifficultyConfig {
        position_range: (-10, 10),
        label_policy: LabelPolicy::Never,
        audio_enabled: false,
    },
];

impl Difficulty {
    /// Index within `DIFFICULTY_ORDER`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The level that must be cleared before this one unlocks.
    /// `None` for the first level, which is always available.
    pub const fn previous(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::LessEasy => Some(Difficulty::Easy),
            Difficulty::Medium => Some(Difficulty::LessEasy),
            Difficulty::Hard => Some(Difficulty::Medium),
            Difficulty::Expert => Some(Difficulty::Hard),
        }
    }

    /// The level unlocked by clearing this one, if any.
    pub const fn next(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::LessEasy),
            Difficulty::LessEasy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => Some(Difficulty::Expert),
            Difficulty::Expert => None,
        }
    }

    /// This level's configuration.
    pub const fn config(self) -> &'static DifficultyConfig {
        &CONFIGS[self as usize]
    }

    /// Stable name, used as the persisted record key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::LessEasy => "lessEasy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        DIFFICULTY_ORDER
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
