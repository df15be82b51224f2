//! Scoring module - line-clear score table
//!
//! One resolution pass clears between zero and four rows in regular play.
//! The five-line entry cannot be reached by clearing rows: it is the payout of
//! the fixed-sequence completion bonus, awarded when the bonus shape locks.

use crate::types::{BONUS_LINES, BONUS_SCORE, LINE_SCORES};

/// Score delta for clearing `lines` rows in one resolution pass
pub fn score_for_lines(lines: u32) -> u32 {
    match lines {
        0..=4 => LINE_SCORES[lines as usize],
        BONUS_LINES => BONUS_SCORE,
        _ => 0,
    }
}

/// Score delta for one lock
///
/// `bonus` replaces the line-clear payout with the completion bonus.
pub fn lock_score(lines: u32, bonus: bool) -> u32 {
    if bonus {
        score_for_lines(BONUS_LINES)
    } else {
        score_for_lines(lines)
    }
}
