//! The persisted progression record.

use nl_theory::Difficulty;
use serde::{Deserialize, Serialize};

/// Cumulative score per difficulty level, as stored on disk: a flat
/// map from level name to a non-negative total. Missing fields load
/// as 0 (merge semantics); unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    #[serde(default)]
    pub easy: u32,
    #[serde(default, rename = "lessEasy")]
    pub less_easy: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub hard: u32,
    #[serde(default)]
    pub expert: u32,
}

impl ProgressionRecord {
    pub fn score(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::LessEasy => self.less_easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }

    pub fn score_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::LessEasy => &mut self.less_easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Expert => &mut self.expert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_theory::DIFFICULTY_ORDER;

    #[test]
    fn default_is_all_zero() {
        let record = ProgressionRecord::default();
        for d in DIFFICULTY_ORDER {
            assert_eq!(record.score(d), 0);
        }
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let record: ProgressionRecord =
            serde_json::from_str(r#"{"easy": 30, "medium": 12}"#).unwrap();
        assert_eq!(record.easy, 30);
        assert_eq!(record.less_easy, 0);
        assert_eq!(record.medium, 12);
        assert_eq!(record.expert, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: ProgressionRecord =
            serde_json::from_str(r#"{"easy": 5, "legacyField": true}"#).unwrap();
        assert_eq!(record.easy, 5);
    }

    #[test]
    fn field_names_match_difficulty_keys() {
        let mut record = ProgressionRecord::default();
        record.less_easy = 7;
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""lessEasy":7"#));
        for d in DIFFICULTY_ORDER {
            assert!(json.contains(&format!(r#""{}""#, d.as_str())), "{}", d);
        }
    }

    #[test]
    fn score_mut_targets_the_right_field() {
        let mut record = ProgressionRecord::default();
        for (i, d) in DIFFICULTY_ORDER.into_iter().enumerate() {
            *record.score_mut(d) += i as u32 + 1;
        }
        assert_eq!(
            DIFFICULTY_ORDER.map(|d| record.score(d)),
            [1, 2, 3, 4, 5]
        );
    }
}
