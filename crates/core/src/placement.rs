//! Placement processing - validate, place, detect clears and score in one step

use serde::{Deserialize, Serialize};

use crate::catalog::Piece;
use crate::grid::{ClearResult, Grid};
use crate::scoring::calculate_score;
use crate::types::Position;

/// Outcome of [`process_placement`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub success: bool,
    pub cleared: ClearResult,
    pub points_earned: u32,
    pub new_combo: u32,
    /// Grid after placement and line clears; the caller commits it.
    pub grid: Grid,
}

impl PlacementResult {
    /// Result of a refused placement: nothing changes
    fn rejected(grid: &Grid, combo: u32) -> Self {
        Self {
            success: false,
            cleared: ClearResult::default(),
            points_earned: 0,
            new_combo: combo,
            grid: *grid,
        }
    }

    pub fn lines_cleared(&self) -> u32 {
        self.cleared.total_cleared()
    }
}

/// Place `piece` at `pos`, find and clear completed lines, and score the move
///
/// An illegal request yields `success == false` with the input grid and combo
/// unchanged.
pub fn process_placement(grid: &Grid, piece: &Piece, pos: Position, combo: u32) -> PlacementResult {
    if !grid.can_place(piece, pos) {
        return PlacementResult::rejected(grid, combo);
    }

    let placed = grid.place(piece, pos);
    let cleared = placed.find_completed_lines();
    let score = calculate_score(piece.block_count(), cleared.total_cleared(), combo);
    let next = placed.clear_lines(&cleared);

    PlacementResult {
        success: true,
        cleared,
        points_earned: score.score,
        new_combo: score.new_combo,
        grid: next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, ShapeKind};

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let grid = Grid::new().with_cell(0, 0, true);
        let piece = Piece::new(ShapeKind::Single, PieceColor::default(), 1);
        let result = process_placement(&grid, &piece, Position::new(0, 0), 3);
        assert!(!result.success);
        assert_eq!(result.points_earned, 0);
        assert_eq!(result.new_combo, 3);
        assert_eq!(result.grid, grid);
    }

    #[test]
    fn test_row_and_column_clear_together() {
        // Row 0 and column 0 both complete when (0, 0) is filled.
        let mut grid = Grid::new();
        for i in 1..8 {
            grid.set(0, i, true);
            grid.set(i, 0, true);
        }
        let piece = Piece::new(ShapeKind::Single, PieceColor::default(), 1);
        let result = process_placement(&grid, &piece, Position::new(0, 0), 0);
        assert!(result.success);
        assert_eq!(result.cleared.rows.as_slice(), &[0]);
        assert_eq!(result.cleared.cols.as_slice(), &[0]);
        assert_eq!(result.lines_cleared(), 2);
        // (1 + 15) * 1.25
        assert_eq!(result.points_earned, 20);
        assert_eq!(result.new_combo, 1);
        assert!(result.grid.is_empty());
    }
}
