//! Clef anchors.
//!
//! A clef is nothing more than the pitch it pins to the staff's center
//! line. Encoding that as a syllable index + octave lets one formula in
//! [`crate::Note::at_position`] serve both clefs (and any future clef)
//! without per-clef branching.

use core::fmt;

use crate::note::NoteName;

/// A mapping from staff position to absolute pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clef {
    /// Treble-like G clef; center line is si₄ (B4).
    Sol,
    /// Bass-like F clef; center line is re₃ (D3).
    Fa,
}

impl Clef {
    /// The pitch on the center line: (syllable, octave).
    pub const fn anchor(self) -> (NoteName, i32) {
        match self {
            Clef::Sol => (NoteName::Si, 4),
            Clef::Fa => (NoteName::Re, 3),
        }
    }

    /// Inverse of position resolution: the staff position at which a
    /// given pitch sits under this clef.
    pub const fn position_of(self, name: NoteName, octave: i32) -> i32 {
        let (anchor, anchor_octave) = self.anchor();
        (octave - anchor_octave) * 7 + name.index() - anchor.index()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Clef::Sol => "sol",
            Clef::Fa => "fa",
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
