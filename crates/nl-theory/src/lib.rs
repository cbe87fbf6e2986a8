//! Pitch and staff-position model for the notenleer trainer.
//!
//! This crate defines the musical vocabulary used throughout the
//! trainer: note names, clefs, staff geometry, and the difficulty
//! table. Everything here is pure functions over plain values; the
//! session machinery and persistence layers build on top of it.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod clef;
mod difficulty;
mod note;
mod staff;

pub use clef::Clef;
pub use difficulty::{Difficulty, DifficultyConfig, LabelPolicy, DIFFICULTY_ORDER};
pub use note::{midi_note, Note, NoteName};
pub use staff::{
    ledger_line_count, ledger_lines, LedgerLines, MAX_LEDGER_LINES, STAFF_BOTTOM, STAFF_LINES,
    STAFF_TOP,
};
