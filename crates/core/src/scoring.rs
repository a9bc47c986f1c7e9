//! Scoring module - placement points, line-clear points and combo multiplier
//!
//! Rules:
//! - Every placed cell is worth `POINTS_PER_BLOCK`.
//! - The first cleared line of a placement is worth `POINTS_FIRST_LINE`, each
//!   further line `POINTS_ADDITIONAL_LINE` (a row and a column cleared together
//!   count as two lines).
//! - A clearing placement increments the combo, any other placement resets it.
//! - The total is multiplied by `1 + combo * COMBO_STEP` using the new combo,
//!   then floored.
//!
//! The full-clear bonus depends on the grid after the clear and is applied by
//! the session, not here.

use crate::types::{COMBO_STEP, POINTS_ADDITIONAL_LINE, POINTS_FIRST_LINE, POINTS_PER_BLOCK};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the placed cells alone.
    pub placement_points: u32,
    /// Points for the cleared lines alone.
    pub line_clear_points: u32,
    /// Combo after this placement.
    pub new_combo: u32,
    /// Final, multiplied and floored.
    pub score: u32,
}

/// Points for the cells of a placed piece
pub fn calculate_placement_points(block_count: u32) -> u32 {
    block_count.saturating_mul(POINTS_PER_BLOCK)
}

/// Points for the lines cleared by one placement
pub fn calculate_line_points(lines_cleared: u32) -> u32 {
    if lines_cleared == 0 {
        return 0;
    }
    POINTS_FIRST_LINE.saturating_add((lines_cleared - 1).saturating_mul(POINTS_ADDITIONAL_LINE))
}

/// Combo multiplier for a combo value
pub fn combo_multiplier(combo: u32) -> f64 {
    1.0 + f64::from(combo) * COMBO_STEP
}

/// Combo display text, e.g. `×1.25`; empty when there is no combo
pub fn format_combo(combo: u32) -> String {
    if combo == 0 {
        return String::new();
    }
    format!("×{:.2}", combo_multiplier(combo))
}

/// Calculate the score of one placement and the resulting combo
pub fn calculate_score(block_count: u32, lines_cleared: u32, current_combo: u32) -> ScoreResult {
    let placement_points = calculate_placement_points(block_count);
    let line_clear_points = calculate_line_points(lines_cleared);

    let new_combo = if lines_cleared > 0 {
        current_combo.saturating_add(1)
    } else {
        0
    };

    let base = f64::from(placement_points) + f64::from(line_clear_points);
    let score = (base * combo_multiplier(new_combo)).floor() as u32;

    ScoreResult {
        placement_points,
        line_clear_points,
        new_combo,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points() {
        assert_eq!(calculate_line_points(0), 0);
        assert_eq!(calculate_line_points(1), 10);
        assert_eq!(calculate_line_points(2), 15);
        assert_eq!(calculate_line_points(4), 25);
    }

    #[test]
    fn test_no_clear_resets_combo() {
        let result = calculate_score(4, 0, 2);
        assert_eq!(result.placement_points, 4);
        assert_eq!(result.line_clear_points, 0);
        assert_eq!(result.new_combo, 0);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_clear_with_running_combo() {
        // base 4 + 15 = 19, combo 3 => x1.75 => floor(33.25)
        let result = calculate_score(4, 2, 2);
        assert_eq!(result.line_clear_points, 15);
        assert_eq!(result.new_combo, 3);
        assert_eq!(result.score, 33);
    }

    #[test]
    fn test_first_clear_already_multiplied() {
        // combo 0 -> 1 => x1.25: (3 + 10) * 1.25 = 16.25
        let result = calculate_score(3, 1, 0);
        assert_eq!(result.new_combo, 1);
        assert_eq!(result.score, 16);
    }

    #[test]
    fn test_combo_multiplier_and_text() {
        assert_eq!(combo_multiplier(0), 1.0);
        assert_eq!(combo_multiplier(4), 2.0);
        assert_eq!(format_combo(0), "");
        assert_eq!(format_combo(1), "×1.25");
        assert_eq!(format_combo(3), "×1.75");
    }
}
