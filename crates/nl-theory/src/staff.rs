//! Staff geometry: line positions and ledger lines.

use arrayvec::ArrayVec;

/// Position of the staff's top line.
pub const STAFF_TOP: i32 = 4;

/// Position of the staff's bottom line.
pub const STAFF_BOTTOM: i32 = -4;

/// The five line positions of the staff body.
pub const STAFF_LINES: [i32; 5] = [-4, -2, 0, 2, 4];

/// Capacity of the ledger-line list. Difficulty ranges top out at
/// position ±10 (3 lines); 8 leaves room for wider future ranges.
pub const MAX_LEDGER_LINES: usize = 8;

/// Ordered ledger-line positions for a note.
pub type LedgerLines = ArrayVec<i32, MAX_LEDGER_LINES>;

/// Ledger lines needed to draw a note at `position`.
///
/// Empty within the staff body. Above the staff the lines sit at
/// 6, 8, ... up to the note's position; below at -6, -8, ... down to
/// it. A note on the space just outside the staff (position ±5) needs
/// no line. Positions beyond the list capacity stop producing lines.
pub fn ledger_lines(position: i32) -> LedgerLines {
    let mut lines = LedgerLines::new();
    if position > STAFF_TOP {
        let mut p = STAFF_TOP + 2;
        while p <= position && !lines.is_full() {
            lines.push(p);
            p += 2;
        }
    } else if position < STAFF_BOTTOM {
        let mut p = STAFF_BOTTOM - 2;
        while p >= position && !lines.is_full() {
            lines.push(p);
            p -= 2;
        }
    }
    lines
}

/// Number of ledger lines needed at `position` (0 within the staff).
pub fn ledger_line_count(position: i32) -> u32 {
    if position.abs() <= STAFF_TOP + 1 {
        0
    } else {
        ((position.abs() - STAFF_TOP) as u32) / 2
    }
}
